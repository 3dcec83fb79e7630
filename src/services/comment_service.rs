// src/services/comment_service.rs
// DOCUMENTATION: Business logic for photo comments

use crate::db::RecordStore;
use crate::errors::GalleryError;
use crate::models::{Comment, CreateCommentRequest};
use uuid::Uuid;

pub struct CommentService;

impl CommentService {
    /// Comments on one photo, oldest first
    pub async fn list_comments(
        records: &dyn RecordStore,
        photo_id: Uuid,
    ) -> Result<Vec<Comment>, GalleryError> {
        records.list_comments(photo_id).await
    }

    /// Add a comment to an existing photo
    pub async fn create_comment(
        records: &dyn RecordStore,
        photo_id: Uuid,
        req: CreateCommentRequest,
    ) -> Result<Comment, GalleryError> {
        let comment = Comment::new(photo_id, req)?;

        if records.get_photo(photo_id).await?.is_none() {
            return Err(GalleryError::NotFound("Photo not found".to_string()));
        }

        records.insert_comment(&comment).await?;
        log::info!("Comment {} added to photo {}", comment.id, photo_id);

        Ok(comment)
    }
}
