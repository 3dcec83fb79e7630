// src/services/photo_service.rs
// DOCUMENTATION: Business logic for guest photos
// PURPOSE: Tie blob storage and metadata together, enforce uploader ownership

use crate::db::RecordStore;
use crate::errors::GalleryError;
use crate::models::{ImageUpload, Photo, PhotoFields};
use crate::storage::BlobStore;
use uuid::Uuid;

/// Outcome of an authorized photo delete
/// DOCUMENTATION: The metadata record is gone in both cases; `BlobRetained`
/// means the image bytes could not be removed and need manual cleanup.
#[derive(Debug, PartialEq, Eq)]
pub enum PhotoDeletion {
    Complete,
    BlobRetained { storage_id: String, reason: String },
}

pub struct PhotoService;

impl PhotoService {
    /// All photos, newest first
    pub async fn list_photos(records: &dyn RecordStore) -> Result<Vec<Photo>, GalleryError> {
        records.list_photos().await
    }

    /// Store the image, then its metadata
    pub async fn create_photo(
        records: &dyn RecordStore,
        blobs: &dyn BlobStore,
        upload: ImageUpload,
        fields: PhotoFields,
    ) -> Result<Photo, GalleryError> {
        let original_name = upload.original_name.clone();
        let blob = blobs.put(upload).await?;
        let photo = Photo::new(blob, original_name, fields);

        if let Err(e) = records.insert_photo(&photo).await {
            // Don't leave an unreachable blob behind
            if let Err(cleanup) = blobs.delete(&photo.storage_id).await {
                log::warn!(
                    "Orphaned blob {} after failed insert: {}",
                    photo.storage_id,
                    cleanup
                );
            }
            return Err(e);
        }

        log::info!(
            "Photo {} uploaded by {} ({})",
            photo.id,
            photo.uploader_name,
            photo.original_name
        );
        Ok(photo)
    }

    /// Delete a photo if `uploader_name` matches the stored uploader
    /// DOCUMENTATION: Blob removal is best-effort; a storage outage never
    /// blocks removing the record. Comments on the photo are left in place.
    pub async fn delete_photo(
        records: &dyn RecordStore,
        blobs: &dyn BlobStore,
        id: Uuid,
        uploader_name: Option<&str>,
    ) -> Result<PhotoDeletion, GalleryError> {
        let photo = records
            .get_photo(id)
            .await?
            .ok_or_else(|| GalleryError::NotFound("Photo not found".to_string()))?;

        if !photo.is_uploaded_by(uploader_name) {
            log::warn!("Rejected delete of photo {}: uploader mismatch", id);
            return Err(GalleryError::Forbidden(
                "Only the uploader can delete this photo".to_string(),
            ));
        }

        let outcome = match blobs.delete(&photo.storage_id).await {
            Ok(()) => PhotoDeletion::Complete,
            Err(e) => {
                log::warn!(
                    "Could not delete blob {} for photo {}: {}",
                    photo.storage_id,
                    id,
                    e
                );
                PhotoDeletion::BlobRetained {
                    storage_id: photo.storage_id.clone(),
                    reason: e.to_string(),
                }
            }
        };

        records.delete_photo(id).await?;
        log::info!("Photo {} deleted ({:?})", id, outcome);

        Ok(outcome)
    }
}
