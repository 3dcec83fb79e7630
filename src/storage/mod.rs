// src/storage/mod.rs
// DOCUMENTATION: Image byte storage
// PURPOSE: Trait over where uploaded images live, plus local and Cloudinary backends

pub mod cloudinary;
pub mod local;

pub use cloudinary::CloudinaryBlobStore;
pub use local::LocalBlobStore;

use crate::errors::GalleryError;
use crate::models::{ImageUpload, StoredBlob};
use async_trait::async_trait;

/// Where photo bytes are kept
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Store the image and report how to find and later delete it
    async fn put(&self, upload: ImageUpload) -> Result<StoredBlob, GalleryError>;

    /// Remove the bytes referenced by `storage_id`
    async fn delete(&self, storage_id: &str) -> Result<(), GalleryError>;
}
