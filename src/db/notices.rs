use sqlx::PgPool;

use crate::models::Notice;

pub async fn list_notices(pool: &PgPool) -> Result<Vec<Notice>, sqlx::Error> {
    sqlx::query_as::<_, Notice>(
        r#"
        SELECT id, title, body, date
        FROM notices
        ORDER BY id ASC
        "#,
    )
    .fetch_all(pool)
    .await
}

pub async fn get_notice(pool: &PgPool, id: i64) -> Result<Option<Notice>, sqlx::Error> {
    sqlx::query_as::<_, Notice>(r#"SELECT id, title, body, date FROM notices WHERE id = $1"#)
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn insert_notice(
    pool: &PgPool,
    title: &str,
    body: &str,
    date: i64,
) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>(
        r#"
        INSERT INTO notices (title, body, date)
        VALUES ($1, $2, $3)
        RETURNING id
        "#,
    )
    .bind(title)
    .bind(body)
    .bind(date)
    .fetch_one(pool)
    .await
}

pub async fn update_notice(
    pool: &PgPool,
    id: i64,
    title: &str,
    body: &str,
    date: i64,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE notices
        SET title = $2, body = $3, date = $4
        WHERE id = $1
        "#,
    )
    .bind(id)
    .bind(title)
    .bind(body)
    .bind(date)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn delete_notice(pool: &PgPool, id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(r#"DELETE FROM notices WHERE id = $1"#)
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
