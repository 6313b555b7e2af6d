use sqlx::PgPool;

use crate::models::{ContentBlock, KeyedContentBlock};

pub async fn get_content_block(
    pool: &PgPool,
    key: &str,
) -> Result<Option<ContentBlock>, sqlx::Error> {
    sqlx::query_as::<_, ContentBlock>(
        r#"
        SELECT title, content
        FROM content_blocks
        WHERE key = $1
        "#,
    )
    .bind(key)
    .fetch_optional(pool)
    .await
}

pub async fn list_content_blocks(pool: &PgPool) -> Result<Vec<KeyedContentBlock>, sqlx::Error> {
    sqlx::query_as::<_, KeyedContentBlock>(
        r#"
        SELECT key, title, content
        FROM content_blocks
        ORDER BY key ASC
        "#,
    )
    .fetch_all(pool)
    .await
}

pub async fn upsert_content_block(
    pool: &PgPool,
    key: &str,
    block: &ContentBlock,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO content_blocks (key, title, content)
        VALUES ($1, $2, $3)
        ON CONFLICT (key) DO UPDATE
        SET title = EXCLUDED.title,
            content = EXCLUDED.content,
            edited_at = now()
        "#,
    )
    .bind(key)
    .bind(&block.title)
    .bind(&block.content)
    .execute(pool)
    .await?;

    Ok(())
}

pub async fn delete_content_block(pool: &PgPool, key: &str) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(r#"DELETE FROM content_blocks WHERE key = $1"#)
        .bind(key)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
