mod common;

#[cfg(test)]
pub mod gate_tests {
    use super::common::*;

    use schoolpress::admin::*;
    use schoolpress::client::Caller;
    use schoolpress::models::*;

    #[tokio::test]
    async fn test_gate_requires_password_first() {
        let backend = backend();
        let admin = seed_admin(&backend).await;

        let client = connect(&backend, Caller::new(Some(admin), None)).await;
        assert_eq!(AdminGate::evaluate(&client).await, AdminGate::PasswordRequired);

        let client = connect(&backend, Caller::new(Some(admin), Some("   ".to_string()))).await;
        assert_eq!(AdminGate::evaluate(&client).await, AdminGate::PasswordRequired);
    }

    #[tokio::test]
    async fn test_gate_requires_login_after_password() {
        let backend = backend();
        let client = connect(&backend, Caller::new(None, Some(ADMIN_SECRET.to_string()))).await;

        assert_eq!(AdminGate::evaluate(&client).await, AdminGate::LoginRequired);
    }

    #[tokio::test]
    async fn test_gate_denies_on_wrong_password() {
        let backend = backend();
        let admin = seed_admin(&backend).await;
        let client = connect(&backend, Caller::new(Some(admin), Some("guess".to_string()))).await;

        let gate = AdminGate::evaluate(&client).await;
        assert_eq!(gate, AdminGate::Denied(DenyReason::QueryFailed));
        assert_eq!(
            DenyReason::QueryFailed.message(),
            "Failed to verify admin access. The password may be incorrect."
        );
    }

    #[tokio::test]
    async fn test_gate_denies_non_admin() {
        let backend = backend();
        seed_admin(&backend).await;
        let user = Principal::new();
        let client = connect(&backend, Caller::new(Some(user), Some(ADMIN_SECRET.to_string()))).await;

        let gate = AdminGate::evaluate(&client).await;
        assert_eq!(gate, AdminGate::Denied(DenyReason::NotAdmin));
        assert!(!gate.is_granted());
        assert_eq!(
            DenyReason::NotAdmin.message(),
            "Your account does not have admin privileges."
        );
    }

    #[tokio::test]
    async fn test_gate_grants_admin() {
        let backend = backend();
        let (admin, client) = admin_client(&backend).await;

        let gate = AdminGate::evaluate(&client).await;
        assert_eq!(gate, AdminGate::Granted(admin));
        assert!(gate.is_granted());
    }

    #[tokio::test]
    async fn test_gate_grants_first_caller_with_secret() {
        let backend = backend();
        let principal = Principal::new();
        let client = connect(
            &backend,
            Caller::new(Some(principal), Some(ADMIN_SECRET.to_string())),
        )
        .await;

        assert_eq!(AdminGate::evaluate(&client).await, AdminGate::Granted(principal));
    }
}
