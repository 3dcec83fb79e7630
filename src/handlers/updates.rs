// src/handlers/updates.rs
// DOCUMENTATION: HTTP handlers for organizer updates
// PURPOSE: Parse requests, call services, return responses

use crate::errors::GalleryError;
use crate::handlers::parse_id;
use crate::models::CreateUpdateRequest;
use crate::services::UpdateService;
use crate::AppState;
use actix_web::{web, HttpResponse, Responder};
use serde_json::json;

/// GET /api/updates
/// All updates, newest first
pub async fn list_updates(state: web::Data<AppState>) -> Result<impl Responder, GalleryError> {
    let updates = UpdateService::list_updates(state.records.as_ref()).await?;
    Ok(HttpResponse::Ok().json(updates))
}

/// POST /api/updates
pub async fn create_update(
    state: web::Data<AppState>,
    req: web::Json<CreateUpdateRequest>,
) -> Result<impl Responder, GalleryError> {
    let update = UpdateService::create_update(state.records.as_ref(), req.into_inner()).await?;
    Ok(HttpResponse::Ok().json(update))
}

/// DELETE /api/updates/{id}
/// Succeeds whether or not the update existed
pub async fn delete_update(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<impl Responder, GalleryError> {
    match parse_id(&path) {
        Some(id) => UpdateService::delete_update(state.records.as_ref(), id).await?,
        None => log::debug!("Delete of malformed update id {:?}", path.as_str()),
    }
    Ok(HttpResponse::Ok().json(json!({ "success": true })))
}

/// Configuration for update routes
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/api/updates")
            .route(web::get().to(list_updates))
            .route(web::post().to(create_update)),
    )
    .service(web::resource("/api/updates/{id}").route(web::delete().to(delete_update)));
}
