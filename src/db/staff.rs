use sqlx::PgPool;

use crate::models::{StaffDraft, StaffMember};

pub async fn list_staff_members(pool: &PgPool) -> Result<Vec<StaffMember>, sqlx::Error> {
    sqlx::query_as::<_, StaffMember>(
        r#"
        SELECT id, name, position, biography, photo_url
        FROM staff_members
        ORDER BY id ASC
        "#,
    )
    .fetch_all(pool)
    .await
}

pub async fn get_staff_member(pool: &PgPool, id: i64) -> Result<Option<StaffMember>, sqlx::Error> {
    sqlx::query_as::<_, StaffMember>(
        r#"
        SELECT id, name, position, biography, photo_url
        FROM staff_members
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn insert_staff_member(pool: &PgPool, data: &StaffDraft) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>(
        r#"
        INSERT INTO staff_members (name, position, biography, photo_url)
        VALUES ($1, $2, $3, $4)
        RETURNING id
        "#,
    )
    .bind(&data.name)
    .bind(&data.position)
    .bind(&data.biography)
    .bind(&data.photo_url)
    .fetch_one(pool)
    .await
}

pub async fn update_staff_member(
    pool: &PgPool,
    id: i64,
    data: &StaffDraft,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE staff_members
        SET name = $2, position = $3, biography = $4, photo_url = $5
        WHERE id = $1
        "#,
    )
    .bind(id)
    .bind(&data.name)
    .bind(&data.position)
    .bind(&data.biography)
    .bind(&data.photo_url)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn delete_staff_member(pool: &PgPool, id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(r#"DELETE FROM staff_members WHERE id = $1"#)
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
