#![cfg(feature = "pg-tests")]

mod common;

#[cfg(test)]
pub mod db_tests {
    use sqlx::PgPool;

    use std::time::Duration;

    use super::common::*;

    use schoolpress::db::*;
    use schoolpress::models::*;
    use schoolpress::services::{ContentService, PgBackend};

    #[sqlx::test(migrations = "./migrations")]
    async fn test_content_block_upsert_replaces(pool: PgPool) {
        let first = ContentBlock {
            title: "Welcome".to_string(),
            content: "Hello".to_string(),
        };
        let second = ContentBlock {
            title: "Welcome back".to_string(),
            content: "Hello again".to_string(),
        };

        content_blocks::upsert_content_block(&pool, "home_welcome", &first)
            .await
            .expect("Failed to insert block");
        content_blocks::upsert_content_block(&pool, "home_welcome", &second)
            .await
            .expect("Failed to replace block");
        content_blocks::upsert_content_block(&pool, "about_history", &first)
            .await
            .expect("Failed to insert block");

        let stored = content_blocks::get_content_block(&pool, "home_welcome")
            .await
            .expect("Failed database query")
            .expect("Block missing");
        assert_eq!(stored.title, "Welcome back");

        let keys: Vec<String> = content_blocks::list_content_blocks(&pool)
            .await
            .expect("Failed database query")
            .into_iter()
            .map(|b| b.key)
            .collect();
        assert_eq!(keys, vec!["about_history", "home_welcome"]);

        assert!(
            content_blocks::delete_content_block(&pool, "home_welcome")
                .await
                .expect("Failed delete")
        );
        assert!(
            !content_blocks::delete_content_block(&pool, "home_welcome")
                .await
                .expect("Failed delete")
        );
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_staff_lifecycle(pool: PgPool) {
        let id = staff::insert_staff_member(&pool, &staff_draft("Ana Ruiz", "Principal"))
            .await
            .expect("Failed insert");
        let other = staff::insert_staff_member(&pool, &staff_draft("Ben Cho", "Teacher"))
            .await
            .expect("Failed insert");
        assert!(other > id);

        let updated = staff::update_staff_member(&pool, id, &staff_draft("Ana Ruiz", "Head"))
            .await
            .expect("Failed update");
        assert!(updated);

        let members = staff::list_staff_members(&pool).await.expect("Failed list");
        assert_eq!(members.len(), 2);
        assert_eq!(members[0].position, "Head");
        assert_eq!(members[1].name, "Ben Cho");

        assert!(staff::delete_staff_member(&pool, id).await.expect("Failed delete"));
        assert!(
            staff::get_staff_member(&pool, id)
                .await
                .expect("Failed query")
                .is_none()
        );
        assert!(
            !staff::update_staff_member(&pool, id, &staff_draft("Ana Ruiz", "Head"))
                .await
                .expect("Failed update")
        );
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_notice_update_and_delete(pool: PgPool) {
        let id = notices::insert_notice(&pool, "Holiday", "School closed", date("2024-01-01"))
            .await
            .expect("Failed insert");

        assert!(
            notices::update_notice(&pool, id, "Holiday", "Closed Friday", date("2024-01-05"))
                .await
                .expect("Failed update")
        );

        let notice = notices::get_notice(&pool, id)
            .await
            .expect("Failed query")
            .expect("Notice missing");
        assert_eq!(notice.body, "Closed Friday");
        assert_eq!(notice.date, date("2024-01-05"));

        assert!(notices::delete_notice(&pool, id).await.expect("Failed delete"));
        assert!(notices::list_notices(&pool).await.expect("Failed list").is_empty());
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_gallery_update_keeps_date_added(pool: PgPool) {
        let added = date("2024-01-01");
        let id = gallery::insert_gallery_item(&pool, &gallery_draft("Sports day"), added)
            .await
            .expect("Failed insert");

        assert!(
            gallery::update_gallery_item(&pool, id, &gallery_draft("Sports day 2026"))
                .await
                .expect("Failed update")
        );

        let item = gallery::get_gallery_item(&pool, id)
            .await
            .expect("Failed query")
            .expect("Item missing");
        assert_eq!(item.title, "Sports day 2026");
        assert_eq!(item.date_added, added);

        assert!(gallery::delete_gallery_item(&pool, id).await.expect("Failed delete"));
        assert!(!gallery::delete_gallery_item(&pool, id).await.expect("Failed delete"));
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_contact_submissions(pool: PgPool) {
        let id = contact::insert_contact_submission(&pool, &contact_draft(), date("2024-01-01"))
            .await
            .expect("Failed insert");

        let all = contact::list_contact_submissions(&pool).await.expect("Failed list");
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].id, id);
        assert_eq!(all[0].email, "jordan@example.org");
        assert_eq!(all[0].timestamp, date("2024-01-01"));

        assert!(contact::delete_contact_submission(&pool, id).await.expect("Failed delete"));
        assert!(contact::list_contact_submissions(&pool).await.expect("Failed list").is_empty());
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_first_caller_claims_admin(pool: PgPool) {
        let first = Principal::new();
        let second = Principal::new();

        let role = roles::register_caller(&pool, first, true).await.expect("Failed register");
        assert_eq!(role, UserRole::Admin);

        let role = roles::register_caller(&pool, second, true).await.expect("Failed register");
        assert_eq!(role, UserRole::User);

        // Registration is sticky.
        let role = roles::register_caller(&pool, first, false).await.expect("Failed register");
        assert_eq!(role, UserRole::Admin);

        assert!(roles::user_is_admin(&pool, first).await.expect("Failed query"));
        assert!(!roles::user_is_admin(&pool, second).await.expect("Failed query"));

        roles::assign_role(&pool, second, UserRole::Admin).await.expect("Failed assign");
        assert_eq!(
            roles::get_user_role(&pool, second).await.expect("Failed query"),
            Some(UserRole::Admin)
        );
        assert_eq!(
            roles::get_user_role(&pool, Principal::new()).await.expect("Failed query"),
            None
        );
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_registered_caller_skips_table_lock(pool: PgPool) {
        let admin = Principal::new();
        roles::register_caller(&pool, admin, true).await.expect("Failed register");

        let mut blocker = pool.begin().await.expect("Failed to begin");
        sqlx::query(r#"LOCK TABLE user_roles IN SHARE ROW EXCLUSIVE MODE"#)
            .execute(&mut *blocker)
            .await
            .expect("Failed to lock");

        let role = tokio::time::timeout(
            Duration::from_secs(5),
            roles::register_caller(&pool, admin, true),
        )
        .await
        .expect("Registered caller waited on the table lock")
        .expect("Failed register");
        assert_eq!(role, UserRole::Admin);

        blocker.rollback().await.expect("Failed to roll back");
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_concurrent_first_claims_yield_one_admin(pool: PgPool) {
        let (first, second) = tokio::join!(
            roles::register_caller(&pool, Principal::new(), true),
            roles::register_caller(&pool, Principal::new(), true),
        );

        let roles = [first.expect("Failed register"), second.expect("Failed register")];
        assert_eq!(roles.iter().filter(|r| r.is_admin()).count(), 1);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_profile_save_overwrites(pool: PgPool) {
        let user = Principal::new();
        assert!(profiles::get_profile(&pool, user).await.expect("Failed query").is_none());

        let mut profile = UserProfile {
            name: "Sam Park".to_string(),
            email: "sam@example.org".to_string(),
        };
        profiles::save_profile(&pool, user, &profile).await.expect("Failed save");

        profile.name = "Samantha Park".to_string();
        profiles::save_profile(&pool, user, &profile).await.expect("Failed save");

        let stored = profiles::get_profile(&pool, user)
            .await
            .expect("Failed query")
            .expect("Profile missing");
        assert_eq!(stored, profile);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_duplicate_account_email(pool: PgPool) {
        let account = accounts::insert_account(&pool, "office@example.org", "hash")
            .await
            .expect("Failed insert")
            .expect("Account missing");

        let duplicate = accounts::insert_account(&pool, "office@example.org", "other")
            .await
            .expect("Failed insert");
        assert!(duplicate.is_none());

        let found = accounts::find_account_by_email(&pool, "office@example.org")
            .await
            .expect("Failed query")
            .expect("Account missing");
        assert_eq!(found.id, account.id);
        assert_eq!(found.password_hash, "hash");
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_backend_requires_admin(pool: PgPool) {
        let backend = PgBackend::new(pool, Some(ADMIN_SECRET.to_string()));
        let admin = Principal::new();
        let outsider = Principal::new();

        assert!(backend.initialize_access(admin, "wrong").await.is_err());
        let role = backend
            .initialize_access(admin, ADMIN_SECRET)
            .await
            .expect("Failed bootstrap");
        assert_eq!(role, UserRole::Admin);

        assert!(
            backend
                .add_notice(Some(outsider), &holiday_notice())
                .await
                .is_err()
        );

        let id = backend
            .add_notice(Some(admin), &holiday_notice())
            .await
            .expect("Failed add");
        let notices = backend.list_notices().await.expect("Failed list");
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].id, id);

        backend.delete_notice(Some(admin), id).await.expect("Failed delete");
        assert!(backend.delete_notice(Some(admin), id).await.is_err());
    }
}
