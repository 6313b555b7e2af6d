mod common;

#[cfg(test)]
pub mod service_tests {
    use super::common::*;

    use schoolpress::common::*;
    use schoolpress::models::*;
    use schoolpress::services::identity::{self, IdentityStore};
    use schoolpress::services::{ContentService, MemoryBackend};

    #[tokio::test]
    async fn test_notice_add_list_delete_example() {
        let backend = backend();
        let admin = seed_admin(&backend).await;

        let id = backend
            .add_notice(Some(admin), &holiday_notice())
            .await
            .expect("Failed to add notice");
        assert_eq!(id, 1);

        let notices = backend.list_notices().await.expect("Failed to list notices");
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].title, "Holiday");
        assert_eq!(notices[0].body, "School closed Monday");
        assert_eq!(notices[0].date, date("2024-01-01"));

        backend
            .delete_notice(Some(admin), 1)
            .await
            .expect("Failed to delete notice");
        assert_eq!(backend.get_notice(1).await.expect("Failed to read notice"), None);
        assert!(backend.list_notices().await.expect("Failed to list").is_empty());
    }

    #[tokio::test]
    async fn test_add_notice_fails_without_date() {
        let backend = backend();
        let admin = seed_admin(&backend).await;
        let draft = NoticeDraft {
            title: "Holiday".to_string(),
            body: "School closed".to_string(),
            date: None,
        };

        let err = backend.add_notice(Some(admin), &draft).await.unwrap_err();
        assert!(matches!(err, ServiceError::InvalidRequest(_)));
    }

    #[tokio::test]
    async fn test_staff_create_then_list_returns_item_once() {
        let backend = backend();
        let admin = seed_admin(&backend).await;
        let draft = staff_draft("Ada Park", "Principal");

        let id = backend
            .add_staff_member(Some(admin), &draft)
            .await
            .expect("Failed to add staff member");

        let staff = backend.list_staff_members().await.expect("Failed to list staff");
        assert_eq!(staff, vec![StaffMember::from_draft(id, &draft)]);
    }

    #[tokio::test]
    async fn test_update_changes_only_target() {
        let backend = backend();
        let admin = seed_admin(&backend).await;

        let first = backend
            .add_gallery_item(Some(admin), &gallery_draft("Sports"))
            .await
            .expect("Failed to add item");
        let second = backend
            .add_gallery_item(Some(admin), &gallery_draft("Science"))
            .await
            .expect("Failed to add item");
        let before = backend
            .get_gallery_item(second)
            .await
            .expect("Failed to read item");

        let mut changed = gallery_draft("Sports Day");
        changed.description = "Annual races".to_string();
        backend
            .update_gallery_item(Some(admin), first, &changed)
            .await
            .expect("Failed to update item");

        let updated = backend
            .get_gallery_item(first)
            .await
            .expect("Failed to read item")
            .expect("Item should exist");
        assert_eq!(updated.title, "Sports Day");
        assert_eq!(updated.description, "Annual races");
        assert_eq!(
            backend.get_gallery_item(second).await.expect("Failed to read item"),
            before
        );
    }

    #[tokio::test]
    async fn test_mutations_require_admin() {
        let backend = backend();
        let user = Principal::new();
        backend.seed_role(user, UserRole::User).await;

        let err = backend
            .add_staff_member(Some(user), &staff_draft("Ada Park", "Principal"))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Unauthorized(_)));

        let err = backend
            .update_content_block(None, "home-welcome", ContentBlock::new("Hi", "There"))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Unauthorized(_)));
    }

    #[tokio::test]
    async fn test_delete_missing_id_is_not_found() {
        let backend = backend();
        let admin = seed_admin(&backend).await;

        let err = backend.delete_staff_member(Some(admin), 42).await.unwrap_err();
        assert!(err.is_not_found());

        let err = backend
            .delete_content_block(Some(admin), "nope")
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_content_block_upsert_and_missing_key() {
        let backend = backend();
        let admin = seed_admin(&backend).await;

        assert_eq!(
            backend.get_content_block("about-history").await.expect("Failed read"),
            None
        );

        backend
            .update_content_block(Some(admin), "about-vision", ContentBlock::new("Vision", "v1"))
            .await
            .expect("Failed to create block");
        backend
            .update_content_block(Some(admin), "about-history", ContentBlock::new("History", "h1"))
            .await
            .expect("Failed to create block");
        backend
            .update_content_block(Some(admin), "about-vision", ContentBlock::new("Vision", "v2"))
            .await
            .expect("Failed to update block");

        let all = backend.get_all_content_blocks().await.expect("Failed to list blocks");
        let keys: Vec<&str> = all.iter().map(|(key, _)| key.as_str()).collect();
        assert_eq!(keys, vec!["about-history", "about-vision"]);
        assert_eq!(all[1].1.content, "v2");
    }

    #[tokio::test]
    async fn test_contact_submissions_are_admin_only() {
        let backend = backend();
        let admin = seed_admin(&backend).await;

        let id = backend
            .submit_contact_form(&contact_draft())
            .await
            .expect("Public submission should succeed");

        let err = backend.get_all_contact_submissions(None).await.unwrap_err();
        assert!(matches!(err, ServiceError::Unauthorized(_)));

        let submissions = backend
            .get_all_contact_submissions(Some(admin))
            .await
            .expect("Admin should list submissions");
        assert_eq!(submissions.len(), 1);
        assert_eq!(submissions[0].id, id);
        assert_eq!(submissions[0].email, "jordan@example.org");

        backend
            .delete_contact_submission(Some(admin), id)
            .await
            .expect("Failed to delete submission");
        assert!(
            backend
                .get_all_contact_submissions(Some(admin))
                .await
                .expect("Failed to list")
                .is_empty()
        );
    }

    #[tokio::test]
    async fn test_initialize_access_grants_first_admin() {
        let backend = backend();
        let first = Principal::new();
        let second = Principal::new();

        let role = backend
            .initialize_access(first, ADMIN_SECRET)
            .await
            .expect("Correct secret should succeed");
        assert_eq!(role, UserRole::Admin);

        let role = backend
            .initialize_access(second, ADMIN_SECRET)
            .await
            .expect("Correct secret should succeed");
        assert_eq!(role, UserRole::User);

        assert!(backend.is_caller_admin(Some(first)).await.expect("Failed check"));
        assert!(!backend.is_caller_admin(Some(second)).await.expect("Failed check"));
    }

    #[tokio::test]
    async fn test_initialize_access_keeps_existing_role() {
        let backend = backend();
        let user = Principal::new();
        backend.seed_role(user, UserRole::User).await;

        let role = backend
            .initialize_access(user, ADMIN_SECRET)
            .await
            .expect("Correct secret should succeed");
        assert_eq!(role, UserRole::User);
    }

    #[tokio::test]
    async fn test_initialize_access_fails_on_wrong_secret() {
        let backend = backend();

        let err = backend
            .initialize_access(Principal::new(), "wrong")
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::InvalidSecret));
    }

    #[tokio::test]
    async fn test_initialize_access_without_secret_registers_user() {
        let backend = MemoryBackend::new(None);

        let role = backend
            .initialize_access(Principal::new(), "anything")
            .await
            .expect("Should register caller");
        assert_eq!(role, UserRole::User);
    }

    #[tokio::test]
    async fn test_unregistered_caller_is_guest() {
        let backend = backend();

        assert_eq!(
            backend.get_caller_role(Some(Principal::new())).await.expect("Failed read"),
            UserRole::Guest
        );
        assert_eq!(
            backend.get_caller_role(None).await.expect("Failed read"),
            UserRole::Guest
        );
    }

    #[tokio::test]
    async fn test_assign_role_requires_admin() {
        let backend = backend();
        let admin = seed_admin(&backend).await;
        let user = Principal::new();

        let err = backend
            .assign_role(Some(user), user, UserRole::Admin)
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Unauthorized(_)));

        backend
            .assign_role(Some(admin), user, UserRole::Admin)
            .await
            .expect("Admin should assign roles");
        assert!(backend.is_caller_admin(Some(user)).await.expect("Failed check"));
    }

    #[tokio::test]
    async fn test_profiles_require_registration() {
        let backend = backend();
        let guest = Principal::new();
        let profile = UserProfile {
            name: "Sam".to_string(),
            email: "sam@example.org".to_string(),
        };

        let err = backend
            .save_caller_profile(Some(guest), &profile)
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Unauthorized(_)));

        backend.seed_role(guest, UserRole::User).await;
        backend
            .save_caller_profile(Some(guest), &profile)
            .await
            .expect("Registered user should save profile");
        assert_eq!(
            backend.get_caller_profile(Some(guest)).await.expect("Failed read"),
            Some(profile)
        );
    }

    #[tokio::test]
    async fn test_user_profile_visible_to_self_and_admin_only() {
        let backend = backend();
        let admin = seed_admin(&backend).await;
        let owner = Principal::new();
        let other = Principal::new();
        backend.seed_role(owner, UserRole::User).await;
        backend.seed_role(other, UserRole::User).await;

        let profile = UserProfile {
            name: "Owner".to_string(),
            email: String::new(),
        };
        backend
            .save_caller_profile(Some(owner), &profile)
            .await
            .expect("Failed to save profile");

        assert_eq!(
            backend.get_user_profile(Some(owner), owner).await.expect("Self read"),
            Some(profile.clone())
        );
        assert_eq!(
            backend.get_user_profile(Some(admin), owner).await.expect("Admin read"),
            Some(profile)
        );
        let err = backend.get_user_profile(Some(other), owner).await.unwrap_err();
        assert!(matches!(err, ServiceError::Unauthorized(_)));
    }

    #[tokio::test]
    async fn test_register_then_authenticate_success() {
        let backend = backend();

        let account = identity::register(&*backend, " Pat@Example.org ", "letters-and-1")
            .await
            .expect("Failed to register");
        assert_eq!(account.email, "pat@example.org");

        let principal = identity::authenticate(&*backend, "pat@example.org", "letters-and-1")
            .await
            .expect("Failed to authenticate");
        assert_eq!(principal, account.id);
    }

    #[tokio::test]
    async fn test_register_fails_on_duplicate_email() {
        let backend = backend();

        identity::register(&*backend, "pat@example.org", "letters-and-1")
            .await
            .expect("Failed to register");
        let err = identity::register(&*backend, "PAT@example.org", "letters-and-2")
            .await
            .unwrap_err();
        assert!(matches!(err, IdentityError::AlreadyExists(_)));
    }

    #[tokio::test]
    async fn test_authenticate_fails_on_wrong_password_or_unknown_email() {
        let backend = backend();
        identity::register(&*backend, "pat@example.org", "letters-and-1")
            .await
            .expect("Failed to register");

        let err = identity::authenticate(&*backend, "pat@example.org", "nope-nope-1")
            .await
            .unwrap_err();
        assert!(matches!(err, IdentityError::InvalidCredentials));

        let err = identity::authenticate(&*backend, "ghost@example.org", "letters-and-1")
            .await
            .unwrap_err();
        assert!(matches!(err, IdentityError::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_identity_store_lookup_is_exact() {
        let backend = backend();
        backend
            .create_account("pat@example.org", "hash")
            .await
            .expect("Failed to create account");

        assert!(
            backend
                .find_account_by_email("pat@example.org")
                .await
                .expect("Failed lookup")
                .is_some()
        );
        assert!(
            backend
                .find_account_by_email("other@example.org")
                .await
                .expect("Failed lookup")
                .is_none()
        );
    }
}
