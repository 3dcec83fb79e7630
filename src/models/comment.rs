// src/models/comment.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use super::{display_name, not_blank, record_timestamp};
use crate::errors::GalleryError;

/// Guest comment on a photo. `photo_id` is not enforced as a foreign key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: Uuid,
    pub photo_id: Uuid,
    pub text: String,
    pub author_name: String,
    pub date: DateTime<Utc>,
}

/// Body of `POST /api/photos/{id}/comments`
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateCommentRequest {
    #[validate(required, custom = "not_blank")]
    pub text: Option<String>,
    pub author_name: Option<String>,
}

impl Comment {
    /// Validate the request and build a comment for `photo_id`
    pub fn new(photo_id: Uuid, req: CreateCommentRequest) -> Result<Self, GalleryError> {
        req.validate()
            .map_err(|_| GalleryError::ValidationError("Comment text required".to_string()))?;

        Ok(Comment {
            id: Uuid::new_v4(),
            photo_id,
            text: req.text.unwrap_or_default().trim().to_string(),
            author_name: display_name(req.author_name),
            date: record_timestamp(),
        })
    }
}
