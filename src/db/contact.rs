use sqlx::PgPool;

use crate::models::{ContactDraft, ContactSubmission};

pub async fn insert_contact_submission(
    pool: &PgPool,
    data: &ContactDraft,
    timestamp: i64,
) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>(
        r#"
        INSERT INTO contact_submissions (name, email, message, timestamp)
        VALUES ($1, $2, $3, $4)
        RETURNING id
        "#,
    )
    .bind(&data.name)
    .bind(&data.email)
    .bind(&data.message)
    .bind(timestamp)
    .fetch_one(pool)
    .await
}

pub async fn list_contact_submissions(
    pool: &PgPool,
) -> Result<Vec<ContactSubmission>, sqlx::Error> {
    sqlx::query_as::<_, ContactSubmission>(
        r#"
        SELECT id, name, email, message, timestamp
        FROM contact_submissions
        ORDER BY id ASC
        "#,
    )
    .fetch_all(pool)
    .await
}

pub async fn delete_contact_submission(pool: &PgPool, id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(r#"DELETE FROM contact_submissions WHERE id = $1"#)
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
