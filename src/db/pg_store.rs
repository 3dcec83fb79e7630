// src/db/pg_store.rs
// DOCUMENTATION: PostgreSQL record store
// PURPOSE: Photo, comment and update rows over a sqlx connection pool

use crate::db::RecordStore;
use crate::errors::GalleryError;
use crate::models::{Comment, Photo, Update};
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

/// Record store using one table per record kind
/// DOCUMENTATION: Inserts and deletes are single statements, so atomicity is
/// left to the database.
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Wrap a pool and bring the schema up to date
    pub async fn new(pool: PgPool) -> Result<Self, GalleryError> {
        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .map_err(|e| GalleryError::DatabaseError(format!("Migration failed: {}", e)))?;

        log::info!("Using PostgreSQL record store");
        Ok(Self { pool })
    }
}

fn db_error(action: &'static str) -> impl Fn(sqlx::Error) -> GalleryError {
    move |e| {
        log::error!("Failed to {}: {}", action, e);
        GalleryError::DatabaseError(format!("{} failed: {}", action, e))
    }
}

#[async_trait]
impl RecordStore for PgStore {
    async fn list_photos(&self) -> Result<Vec<Photo>, GalleryError> {
        sqlx::query_as::<_, Photo>(
            r#"
            SELECT id, filename, storage_id, original_name, caption, uploader_name, date
            FROM photos
            ORDER BY date DESC, id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("list photos"))
    }

    async fn get_photo(&self, id: Uuid) -> Result<Option<Photo>, GalleryError> {
        sqlx::query_as::<_, Photo>(
            r#"
            SELECT id, filename, storage_id, original_name, caption, uploader_name, date
            FROM photos
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("fetch photo"))
    }

    async fn insert_photo(&self, photo: &Photo) -> Result<(), GalleryError> {
        sqlx::query(
            r#"
            INSERT INTO photos (
                id, filename, storage_id, original_name, caption, uploader_name, date
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(photo.id)
        .bind(&photo.filename)
        .bind(&photo.storage_id)
        .bind(&photo.original_name)
        .bind(&photo.caption)
        .bind(&photo.uploader_name)
        .bind(photo.date)
        .execute(&self.pool)
        .await
        .map_err(db_error("insert photo"))?;

        Ok(())
    }

    async fn delete_photo(&self, id: Uuid) -> Result<bool, GalleryError> {
        let result = sqlx::query("DELETE FROM photos WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_error("delete photo"))?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_comments(&self, photo_id: Uuid) -> Result<Vec<Comment>, GalleryError> {
        sqlx::query_as::<_, Comment>(
            r#"
            SELECT id, photo_id, text, author_name, date
            FROM comments
            WHERE photo_id = $1
            ORDER BY date ASC, id
            "#,
        )
        .bind(photo_id)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("list comments"))
    }

    async fn insert_comment(&self, comment: &Comment) -> Result<(), GalleryError> {
        sqlx::query(
            r#"
            INSERT INTO comments (id, photo_id, text, author_name, date)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(comment.id)
        .bind(comment.photo_id)
        .bind(&comment.text)
        .bind(&comment.author_name)
        .bind(comment.date)
        .execute(&self.pool)
        .await
        .map_err(db_error("insert comment"))?;

        Ok(())
    }

    async fn list_updates(&self) -> Result<Vec<Update>, GalleryError> {
        sqlx::query_as::<_, Update>(
            r#"
            SELECT id, title, content, category, date
            FROM updates
            ORDER BY date DESC, id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("list updates"))
    }

    async fn insert_update(&self, update: &Update) -> Result<(), GalleryError> {
        sqlx::query(
            r#"
            INSERT INTO updates (id, title, content, category, date)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(update.id)
        .bind(&update.title)
        .bind(&update.content)
        .bind(&update.category)
        .bind(update.date)
        .execute(&self.pool)
        .await
        .map_err(db_error("insert update"))?;

        Ok(())
    }

    async fn delete_update(&self, id: Uuid) -> Result<bool, GalleryError> {
        let result = sqlx::query("DELETE FROM updates WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_error("delete update"))?;

        Ok(result.rows_affected() > 0)
    }

    async fn purge_photos(&self) -> Result<u64, GalleryError> {
        let result = sqlx::query("DELETE FROM photos")
            .execute(&self.pool)
            .await
            .map_err(db_error("purge photos"))?;

        Ok(result.rows_affected())
    }

    async fn purge_comments(&self) -> Result<u64, GalleryError> {
        let result = sqlx::query("DELETE FROM comments")
            .execute(&self.pool)
            .await
            .map_err(db_error("purge comments"))?;

        Ok(result.rows_affected())
    }
}
