// src/models/photo.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::{display_name, record_timestamp};
use crate::errors::GalleryError;

/// Upload ceiling for a single image (10 MiB)
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Accepted file extensions, compared case-insensitively
pub const ALLOWED_EXTENSIONS: [&str; 5] = ["jpeg", "jpg", "png", "gif", "webp"];

const ALLOWED_CONTENT_TYPES: [&str; 4] = ["image/jpeg", "image/png", "image/gif", "image/webp"];

/// Guest photo metadata. The image bytes live in a blob store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Photo {
    pub id: Uuid,
    /// Storage locator: absolute URL or `/uploads/<name>` path
    pub filename: String,
    /// Blob store reference used for deletion
    pub storage_id: String,
    pub original_name: String,
    pub caption: String,
    pub uploader_name: String,
    pub date: DateTime<Utc>,
}

/// Text fields sent alongside the `photo` multipart field
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhotoFields {
    pub caption: Option<String>,
    pub uploader_name: Option<String>,
}

/// Body of `DELETE /api/photos/{id}`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletePhotoRequest {
    pub uploader_name: Option<String>,
}

/// Where a blob store put the bytes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredBlob {
    pub locator: String,
    pub storage_id: String,
}

/// A validated image attachment, ready for a blob store
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub original_name: String,
    /// Lowercased extension from the allow-list
    pub extension: String,
    pub content_type: Option<mime::Mime>,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    /// Check the attachment against the size limit and type allow-list
    pub fn new(
        original_name: String,
        content_type: Option<mime::Mime>,
        bytes: Vec<u8>,
    ) -> Result<Self, GalleryError> {
        if bytes.len() > MAX_UPLOAD_BYTES {
            return Err(GalleryError::PayloadTooLarge(
                "File exceeds the 10 MiB limit".to_string(),
            ));
        }

        let extension = std::path::Path::new(&original_name)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .filter(|e| ALLOWED_EXTENSIONS.contains(&e.as_str()))
            .ok_or_else(|| {
                GalleryError::InvalidInput("Only image files are allowed".to_string())
            })?;

        if let Some(ct) = &content_type {
            if !ALLOWED_CONTENT_TYPES.contains(&ct.essence_str()) {
                return Err(GalleryError::InvalidInput(
                    "Only image files are allowed".to_string(),
                ));
            }
        }

        Ok(Self {
            original_name,
            extension,
            content_type,
            bytes,
        })
    }

    /// Content type to hand to storage backends
    pub fn mime_type(&self) -> mime::Mime {
        self.content_type.clone().unwrap_or_else(|| match self.extension.as_str() {
            "png" => mime::IMAGE_PNG,
            "gif" => mime::IMAGE_GIF,
            "webp" => "image/webp".parse().unwrap_or(mime::APPLICATION_OCTET_STREAM),
            _ => mime::IMAGE_JPEG,
        })
    }
}

impl Photo {
    /// Build the metadata record for a freshly stored blob
    pub fn new(blob: StoredBlob, original_name: String, fields: PhotoFields) -> Self {
        Photo {
            id: Uuid::new_v4(),
            filename: blob.locator,
            storage_id: blob.storage_id,
            original_name,
            caption: fields.caption.map(|c| c.trim().to_string()).unwrap_or_default(),
            uploader_name: display_name(fields.uploader_name),
            date: record_timestamp(),
        }
    }

    /// Case-insensitive, whitespace-insensitive uploader comparison
    pub fn is_uploaded_by(&self, name: Option<&str>) -> bool {
        let provided = name.unwrap_or("").trim().to_lowercase();
        self.uploader_name.trim().to_lowercase() == provided
    }
}
