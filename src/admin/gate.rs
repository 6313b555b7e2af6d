use crate::client::ServiceClient;
use crate::models::Principal;

/// Result of running the admin guard for one request.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum AdminGate {
    PasswordRequired,
    LoginRequired,
    Denied(DenyReason),
    Granted(Principal),
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum DenyReason {
    /// The admin check itself failed, most likely a wrong unlock token.
    QueryFailed,
    NotAdmin,
}

impl DenyReason {
    pub fn message(&self) -> &'static str {
        match self {
            Self::QueryFailed => {
                "Failed to verify admin access. The password may be incorrect."
            }
            Self::NotAdmin => "Your account does not have admin privileges.",
        }
    }
}

impl AdminGate {
    /// Checks the unlock token, then the identity, then the admin role.
    pub async fn evaluate(client: &ServiceClient) -> Self {
        let has_token = client
            .caller()
            .unlock_token
            .as_deref()
            .is_some_and(|token| !token.trim().is_empty());

        if !has_token {
            return Self::PasswordRequired;
        }

        let Some(principal) = client.principal() else {
            return Self::LoginRequired;
        };

        match client.is_caller_admin().await {
            Ok(true) => Self::Granted(principal),
            Ok(false) => Self::Denied(DenyReason::NotAdmin),
            Err(e) => {
                log::warn!("Admin check failed for {}: {}", principal, e);
                Self::Denied(DenyReason::QueryFailed)
            }
        }
    }

    pub fn is_granted(&self) -> bool {
        matches!(self, Self::Granted(_))
    }
}
