// src/errors.rs
// DOCUMENTATION: Custom error types and HTTP responses
// PURPOSE: Centralized error handling for entire application

use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use serde_json::json;
use thiserror::Error;

/// Application-specific error types
/// DOCUMENTATION: One enum shared by stores, services and handlers
/// Each variant maps to an HTTP status code and a `{"error": ...}` body
#[derive(Error, Debug)]
pub enum GalleryError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    InvalidInput(String),

    #[error("{0}")]
    ValidationError(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    PayloadTooLarge(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("External API error: {0}")]
    ExternalApiError(String),

    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl GalleryError {
    /// Message exposed to clients. Server-side causes stay in the logs.
    fn public_message(&self) -> String {
        match self {
            GalleryError::DatabaseError(_)
            | GalleryError::StorageError(_)
            | GalleryError::InternalError(_) => "Something went wrong".to_string(),
            GalleryError::ExternalApiError(_) => "Image storage unavailable".to_string(),
            other => other.to_string(),
        }
    }
}

impl From<std::io::Error> for GalleryError {
    fn from(e: std::io::Error) -> Self {
        GalleryError::StorageError(e.to_string())
    }
}

/// Convert GalleryError to HTTP response
impl ResponseError for GalleryError {
    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            log::error!("Request failed: {}", self);
        }

        HttpResponse::build(status).json(json!({ "error": self.public_message() }))
    }

    fn status_code(&self) -> StatusCode {
        match self {
            GalleryError::NotFound(_) => StatusCode::NOT_FOUND,
            GalleryError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            GalleryError::ValidationError(_) => StatusCode::BAD_REQUEST,
            GalleryError::Forbidden(_) => StatusCode::FORBIDDEN,
            GalleryError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            GalleryError::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            GalleryError::StorageError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            GalleryError::ExternalApiError(_) => StatusCode::BAD_GATEWAY,
            GalleryError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
