use sqlx::PgPool;

use crate::models::{Principal, UserProfile};

pub async fn get_profile(
    pool: &PgPool,
    user_id: Principal,
) -> Result<Option<UserProfile>, sqlx::Error> {
    sqlx::query_as::<_, UserProfile>(
        r#"SELECT name, email FROM user_profiles WHERE user_id = $1"#,
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await
}

pub async fn save_profile(
    pool: &PgPool,
    user_id: Principal,
    profile: &UserProfile,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO user_profiles (user_id, name, email)
        VALUES ($1, $2, $3)
        ON CONFLICT (user_id) DO UPDATE
        SET name = EXCLUDED.name,
            email = EXCLUDED.email,
            edited_at = now()
        "#,
    )
    .bind(user_id)
    .bind(&profile.name)
    .bind(&profile.email)
    .execute(pool)
    .await?;

    Ok(())
}
