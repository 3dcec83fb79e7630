// src/handlers/comments.rs
// DOCUMENTATION: HTTP handlers for photo comments

use crate::errors::GalleryError;
use crate::handlers::parse_id;
use crate::models::CreateCommentRequest;
use crate::services::CommentService;
use crate::AppState;
use actix_web::{web, HttpResponse, Responder};

/// GET /api/photos/{id}/comments
/// Comments on a photo, oldest first
pub async fn list_comments(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<impl Responder, GalleryError> {
    let comments = match parse_id(&path) {
        Some(photo_id) => CommentService::list_comments(state.records.as_ref(), photo_id).await?,
        None => Vec::new(),
    };
    Ok(HttpResponse::Ok().json(comments))
}

/// POST /api/photos/{id}/comments
pub async fn create_comment(
    state: web::Data<AppState>,
    path: web::Path<String>,
    req: web::Json<CreateCommentRequest>,
) -> Result<impl Responder, GalleryError> {
    let photo_id =
        parse_id(&path).ok_or_else(|| GalleryError::NotFound("Photo not found".to_string()))?;
    let comment =
        CommentService::create_comment(state.records.as_ref(), photo_id, req.into_inner()).await?;
    Ok(HttpResponse::Ok().json(comment))
}

/// Configuration for comment routes
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/api/photos/{id}/comments")
            .route(web::get().to(list_comments))
            .route(web::post().to(create_comment)),
    );
}
