// src/db/mod.rs
// DOCUMENTATION: Record persistence layer
// PURPOSE: Storage trait for photo/comment/update metadata plus its backends

pub mod file_store;
pub mod pg_store;

pub use file_store::JsonFileStore;
pub use pg_store::PgStore;

use crate::errors::GalleryError;
use crate::models::{Comment, Photo, Update};
use async_trait::async_trait;
use uuid::Uuid;

/// Metadata storage for the three record kinds
/// DOCUMENTATION: Built once at start-up and shared by every handler.
/// Listings come back already sorted: photos and updates newest first,
/// comments oldest first.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn list_photos(&self) -> Result<Vec<Photo>, GalleryError>;

    async fn get_photo(&self, id: Uuid) -> Result<Option<Photo>, GalleryError>;

    async fn insert_photo(&self, photo: &Photo) -> Result<(), GalleryError>;

    /// Returns `false` when no record had that id
    async fn delete_photo(&self, id: Uuid) -> Result<bool, GalleryError>;

    async fn list_comments(&self, photo_id: Uuid) -> Result<Vec<Comment>, GalleryError>;

    async fn insert_comment(&self, comment: &Comment) -> Result<(), GalleryError>;

    async fn list_updates(&self) -> Result<Vec<Update>, GalleryError>;

    async fn insert_update(&self, update: &Update) -> Result<(), GalleryError>;

    /// Returns `false` when no record had that id
    async fn delete_update(&self, id: Uuid) -> Result<bool, GalleryError>;

    /// Remove every photo record, returning how many were removed
    async fn purge_photos(&self) -> Result<u64, GalleryError>;

    /// Remove every comment record, returning how many were removed
    async fn purge_comments(&self) -> Result<u64, GalleryError>;
}
