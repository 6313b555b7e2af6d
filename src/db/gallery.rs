use sqlx::PgPool;

use crate::models::{GalleryDraft, GalleryItem};

pub async fn list_gallery_items(pool: &PgPool) -> Result<Vec<GalleryItem>, sqlx::Error> {
    sqlx::query_as::<_, GalleryItem>(
        r#"
        SELECT id, title, description, image_url, date_added
        FROM gallery_items
        ORDER BY id ASC
        "#,
    )
    .fetch_all(pool)
    .await
}

pub async fn get_gallery_item(pool: &PgPool, id: i64) -> Result<Option<GalleryItem>, sqlx::Error> {
    sqlx::query_as::<_, GalleryItem>(
        r#"
        SELECT id, title, description, image_url, date_added
        FROM gallery_items
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn insert_gallery_item(
    pool: &PgPool,
    data: &GalleryDraft,
    date_added: i64,
) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>(
        r#"
        INSERT INTO gallery_items (title, description, image_url, date_added)
        VALUES ($1, $2, $3, $4)
        RETURNING id
        "#,
    )
    .bind(&data.title)
    .bind(&data.description)
    .bind(&data.image_url)
    .bind(date_added)
    .fetch_one(pool)
    .await
}

/// Leaves `date_added` untouched.
pub async fn update_gallery_item(
    pool: &PgPool,
    id: i64,
    data: &GalleryDraft,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE gallery_items
        SET title = $2, description = $3, image_url = $4
        WHERE id = $1
        "#,
    )
    .bind(id)
    .bind(&data.title)
    .bind(&data.description)
    .bind(&data.image_url)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn delete_gallery_item(pool: &PgPool, id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(r#"DELETE FROM gallery_items WHERE id = $1"#)
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
