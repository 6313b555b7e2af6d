use sqlx::PgPool;

use crate::models::{Principal, UserRole};

pub async fn get_user_role(
    pool: &PgPool,
    user_id: Principal,
) -> Result<Option<UserRole>, sqlx::Error> {
    sqlx::query_scalar::<_, UserRole>(r#"SELECT role FROM user_roles WHERE user_id = $1"#)
        .bind(user_id)
        .fetch_optional(pool)
        .await
}

pub async fn user_is_admin(pool: &PgPool, user_id: Principal) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar::<_, bool>(
        r#"
        SELECT EXISTS(
            SELECT 1
            FROM user_roles
            WHERE user_id = $1 AND role = 'admin'
        )
        "#,
    )
    .bind(user_id)
    .fetch_one(pool)
    .await
}

pub async fn assign_role(
    pool: &PgPool,
    user_id: Principal,
    role: UserRole,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO user_roles (user_id, role)
        VALUES ($1, $2)
        ON CONFLICT (user_id) DO UPDATE
        SET role = EXCLUDED.role, assigned_at = now()
        "#,
    )
    .bind(user_id)
    .bind(role.as_str())
    .execute(pool)
    .await?;

    Ok(())
}

/// Registers `user_id` on first sight.
///
/// With `may_claim_admin` the first registered caller becomes admin when no
/// admin exists yet. Existing registrations are returned unchanged, without
/// taking the table lock.
pub async fn register_caller(
    pool: &PgPool,
    user_id: Principal,
    may_claim_admin: bool,
) -> Result<UserRole, sqlx::Error> {
    if let Some(role) = get_user_role(pool, user_id).await? {
        return Ok(role);
    }

    let mut tx = pool.begin().await?;

    // Serializes concurrent first-admin claims.
    sqlx::query(r#"LOCK TABLE user_roles IN SHARE ROW EXCLUSIVE MODE"#)
        .execute(&mut *tx)
        .await?;

    // Another request may have registered the caller before the lock.
    let existing =
        sqlx::query_scalar::<_, UserRole>(r#"SELECT role FROM user_roles WHERE user_id = $1"#)
            .bind(user_id)
            .fetch_optional(&mut *tx)
            .await?;

    if let Some(role) = existing {
        tx.commit().await?;
        return Ok(role);
    }

    let admin_exists = sqlx::query_scalar::<_, bool>(
        r#"SELECT EXISTS(SELECT 1 FROM user_roles WHERE role = 'admin')"#,
    )
    .fetch_one(&mut *tx)
    .await?;

    let role = if may_claim_admin && !admin_exists {
        UserRole::Admin
    } else {
        UserRole::User
    };

    sqlx::query(r#"INSERT INTO user_roles (user_id, role) VALUES ($1, $2)"#)
        .bind(user_id)
        .bind(role.as_str())
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    Ok(role)
}
