// src/storage/local.rs
// DOCUMENTATION: Filesystem blob store
// PURPOSE: Keep uploads in a directory that is served under /uploads

use crate::errors::GalleryError;
use crate::models::{ImageUpload, StoredBlob};
use crate::storage::BlobStore;
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::PathBuf;
use uuid::Uuid;

/// URL prefix the uploads directory is mounted at
pub const UPLOADS_ROUTE: &str = "/uploads";

pub struct LocalBlobStore {
    dir: PathBuf,
}

impl LocalBlobStore {
    pub async fn open(dir: impl Into<PathBuf>) -> Result<Self, GalleryError> {
        let dir = dir.into();
        tokio::fs::create_dir_all(&dir).await?;
        log::info!("Storing uploads in {}", dir.display());
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &PathBuf {
        &self.dir
    }
}

/// Storage ids are bare file names we generated ourselves
fn is_plain_file_name(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains(['/', '\\'])
}

#[async_trait]
impl BlobStore for LocalBlobStore {
    async fn put(&self, upload: ImageUpload) -> Result<StoredBlob, GalleryError> {
        let name = format!(
            "{}-{}.{}",
            chrono::Utc::now().timestamp_millis(),
            Uuid::new_v4().simple(),
            upload.extension
        );

        tokio::fs::write(self.dir.join(&name), &upload.bytes)
            .await
            .map_err(|e| {
                log::error!("Failed to write upload {}: {}", name, e);
                GalleryError::StorageError(format!("Write {} failed: {}", name, e))
            })?;

        log::debug!("Stored {} ({} bytes) as {}", upload.original_name, upload.bytes.len(), name);

        Ok(StoredBlob {
            locator: format!("{}/{}", UPLOADS_ROUTE, name),
            storage_id: name,
        })
    }

    async fn delete(&self, storage_id: &str) -> Result<(), GalleryError> {
        if !is_plain_file_name(storage_id) {
            return Err(GalleryError::StorageError(format!(
                "Refusing to delete suspicious path {:?}",
                storage_id
            )));
        }

        match tokio::fs::remove_file(self.dir.join(storage_id)).await {
            Ok(()) => Ok(()),
            // Already gone is as good as deleted
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
