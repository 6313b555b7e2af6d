use sqlx::PgPool;

use crate::models::UserAccount;

/// Returns `None` when the email is already registered.
pub async fn insert_account(
    pool: &PgPool,
    email: &str,
    password_hash: &str,
) -> Result<Option<UserAccount>, sqlx::Error> {
    sqlx::query_as::<_, UserAccount>(
        r#"
        INSERT INTO users (email, password_hash) VALUES ($1, $2)
        ON CONFLICT (email) DO NOTHING
        RETURNING id, email, password_hash, created_at
        "#,
    )
    .bind(email)
    .bind(password_hash)
    .fetch_optional(pool)
    .await
}

pub async fn find_account_by_email(
    pool: &PgPool,
    email: &str,
) -> Result<Option<UserAccount>, sqlx::Error> {
    sqlx::query_as::<_, UserAccount>(
        r#"
        SELECT id, email, password_hash, created_at
        FROM users
        WHERE email = $1
        "#,
    )
    .bind(email)
    .fetch_optional(pool)
    .await
}
