// src/storage/cloudinary.rs
// DOCUMENTATION: Cloudinary upload API client
// PURPOSE: Store and delete images through Cloudinary's signed REST endpoints

use crate::errors::GalleryError;
use crate::models::{ImageUpload, StoredBlob};
use crate::storage::BlobStore;
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::Deserialize;
use sha1::{Digest, Sha1};
use std::time::Duration;

/// Uploads are downscaled to fit inside 1200x1200
const UPLOAD_TRANSFORMATION: &str = "c_limit,h_1200,w_1200";

/// Cloudinary credentials and target folder
#[derive(Debug, Clone)]
pub struct CloudinaryConfig {
    pub cloud_name: String,
    pub api_key: String,
    pub api_secret: String,
    pub folder: String,
}

/// Blob store talking to the Cloudinary image API
/// DOCUMENTATION: Every call is signed with the API secret; the secret itself
/// never leaves the process.
pub struct CloudinaryBlobStore {
    /// HTTP client for making requests
    client: Client,
    config: CloudinaryConfig,
    /// Base URL for the Cloudinary API
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    public_id: String,
    secure_url: String,
}

#[derive(Debug, Deserialize)]
struct DestroyResponse {
    result: String,
}

impl CloudinaryBlobStore {
    pub fn new(config: CloudinaryConfig) -> Result<Self, GalleryError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .map_err(|e| GalleryError::InternalError(format!("HTTP client: {}", e)))?;

        Ok(Self {
            client,
            config,
            base_url: "https://api.cloudinary.com".to_string(),
        })
    }

    /// Point the client at another API host
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn endpoint(&self, action: &str) -> String {
        format!(
            "{}/v1_1/{}/image/{}",
            self.base_url, self.config.cloud_name, action
        )
    }

    /// Signature over the signed parameters: sorted `k=v` pairs joined by
    /// `&`, the API secret appended, SHA-1, lowercase hex
    fn sign(&self, params: &[(&str, String)]) -> String {
        sign_params(params, &self.config.api_secret)
    }

    fn timestamp() -> String {
        chrono::Utc::now().timestamp().to_string()
    }
}

fn sign_params(params: &[(&str, String)], api_secret: &str) -> String {
    let mut sorted: Vec<&(&str, String)> = params.iter().collect();
    sorted.sort_by(|a, b| a.0.cmp(b.0));

    let joined = sorted
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join("&");

    let mut hasher = Sha1::new();
    hasher.update(joined.as_bytes());
    hasher.update(api_secret.as_bytes());
    hex::encode(hasher.finalize())
}

async fn api_failure(action: &str, response: reqwest::Response) -> GalleryError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    log::error!("Cloudinary {} error {}: {}", action, status, body);
    GalleryError::ExternalApiError(format!("{} failed with {}: {}", action, status, body))
}

#[async_trait]
impl BlobStore for CloudinaryBlobStore {
    async fn put(&self, upload: ImageUpload) -> Result<StoredBlob, GalleryError> {
        let signed = vec![
            ("folder", self.config.folder.clone()),
            ("timestamp", Self::timestamp()),
            ("transformation", UPLOAD_TRANSFORMATION.to_string()),
        ];
        let signature = self.sign(&signed);

        let file = Part::bytes(upload.bytes.clone())
            .file_name(upload.original_name.clone())
            .mime_str(upload.mime_type().as_ref())
            .map_err(|e| GalleryError::InvalidInput(format!("Bad content type: {}", e)))?;

        let mut form = Form::new()
            .part("file", file)
            .text("api_key", self.config.api_key.clone())
            .text("signature", signature);
        for (key, value) in signed {
            form = form.text(key, value);
        }

        log::debug!(
            "Cloudinary upload: {} ({} bytes)",
            upload.original_name,
            upload.bytes.len()
        );

        let response = self
            .client
            .post(self.endpoint("upload"))
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                log::error!("Cloudinary upload request failed: {}", e);
                GalleryError::ExternalApiError(format!("Request failed: {}", e))
            })?;

        if !response.status().is_success() {
            return Err(api_failure("upload", response).await);
        }

        let uploaded: UploadResponse = response.json().await.map_err(|e| {
            log::error!("Failed to parse Cloudinary upload response: {}", e);
            GalleryError::ExternalApiError(format!("Parse error: {}", e))
        })?;

        log::info!("Uploaded {} to Cloudinary", uploaded.public_id);

        Ok(StoredBlob {
            locator: uploaded.secure_url,
            storage_id: uploaded.public_id,
        })
    }

    async fn delete(&self, storage_id: &str) -> Result<(), GalleryError> {
        let mut params = vec![
            ("public_id", storage_id.to_string()),
            ("timestamp", Self::timestamp()),
        ];
        let signature = self.sign(&params);
        params.push(("api_key", self.config.api_key.clone()));
        params.push(("signature", signature));

        let response = self
            .client
            .post(self.endpoint("destroy"))
            .form(&params)
            .send()
            .await
            .map_err(|e| {
                log::error!("Cloudinary destroy request failed: {}", e);
                GalleryError::ExternalApiError(format!("Request failed: {}", e))
            })?;

        if !response.status().is_success() {
            return Err(api_failure("destroy", response).await);
        }

        let destroyed: DestroyResponse = response.json().await.map_err(|e| {
            GalleryError::ExternalApiError(format!("Parse error: {}", e))
        })?;

        match destroyed.result.as_str() {
            "ok" | "not found" => Ok(()),
            other => Err(GalleryError::ExternalApiError(format!(
                "Destroy of {} answered {:?}",
                storage_id, other
            ))),
        }
    }
}
