// src/handlers/photos.rs
// DOCUMENTATION: HTTP handlers for guest photos
// PURPOSE: Parse requests, call services, return responses

use crate::errors::GalleryError;
use crate::handlers::parse_id;
use crate::models::{DeletePhotoRequest, ImageUpload, PhotoFields, MAX_UPLOAD_BYTES};
use crate::services::PhotoService;
use crate::AppState;
use actix_multipart::{Field, Multipart, MultipartError};
use actix_web::{web, HttpResponse, Responder};
use futures::TryStreamExt;
use serde_json::json;

/// GET /api/photos
/// All photos, newest first
pub async fn list_photos(state: web::Data<AppState>) -> Result<impl Responder, GalleryError> {
    let photos = PhotoService::list_photos(state.records.as_ref()).await?;
    Ok(HttpResponse::Ok().json(photos))
}

/// POST /api/photos
/// Multipart upload: file field `photo`, text fields `caption` and `uploaderName`
pub async fn upload_photo(
    state: web::Data<AppState>,
    payload: Multipart,
) -> Result<impl Responder, GalleryError> {
    let (upload, fields) = read_upload_form(payload).await?;
    let upload =
        upload.ok_or_else(|| GalleryError::InvalidInput("No file uploaded".to_string()))?;

    let photo = PhotoService::create_photo(
        state.records.as_ref(),
        state.blobs.as_ref(),
        upload,
        fields,
    )
    .await?;
    Ok(HttpResponse::Ok().json(photo))
}

/// DELETE /api/photos/{id}
/// Only the original uploader (by name) may delete
pub async fn delete_photo(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: Option<web::Json<DeletePhotoRequest>>,
) -> Result<impl Responder, GalleryError> {
    let id = parse_id(&path).ok_or_else(|| GalleryError::NotFound("Photo not found".to_string()))?;
    let req = body.map(|b| b.into_inner()).unwrap_or_default();

    PhotoService::delete_photo(
        state.records.as_ref(),
        state.blobs.as_ref(),
        id,
        req.uploader_name.as_deref(),
    )
    .await?;
    Ok(HttpResponse::Ok().json(json!({ "success": true })))
}

fn malformed(e: MultipartError) -> GalleryError {
    GalleryError::InvalidInput(format!("Malformed upload: {}", e))
}

/// Walk the multipart stream, keeping the first `photo` file and the text fields
async fn read_upload_form(
    mut payload: Multipart,
) -> Result<(Option<ImageUpload>, PhotoFields), GalleryError> {
    let mut upload = None;
    let mut fields = PhotoFields::default();

    while let Some(mut field) = payload.try_next().await.map_err(malformed)? {
        let name = field.name().unwrap_or_default().to_string();

        match name.as_str() {
            "photo" if upload.is_none() => {
                let filename = field
                    .content_disposition()
                    .and_then(|cd| cd.get_filename())
                    .unwrap_or_default()
                    .to_string();
                let content_type = field.content_type().cloned();
                let bytes = read_bytes(&mut field, MAX_UPLOAD_BYTES).await?;

                // Browsers send an empty, nameless part when no file was picked
                if filename.is_empty() && bytes.is_empty() {
                    continue;
                }
                upload = Some(ImageUpload::new(filename, content_type, bytes)?);
            }
            "caption" => fields.caption = Some(read_text(&mut field).await?),
            "uploaderName" => fields.uploader_name = Some(read_text(&mut field).await?),
            _ => {
                while field.try_next().await.map_err(malformed)?.is_some() {}
            }
        }
    }

    Ok((upload, fields))
}

async fn read_bytes(field: &mut Field, limit: usize) -> Result<Vec<u8>, GalleryError> {
    let mut bytes = Vec::new();
    while let Some(chunk) = field.try_next().await.map_err(malformed)? {
        if bytes.len() + chunk.len() > limit {
            return Err(GalleryError::PayloadTooLarge(
                "File exceeds the 10 MiB limit".to_string(),
            ));
        }
        bytes.extend_from_slice(&chunk);
    }
    Ok(bytes)
}

async fn read_text(field: &mut Field) -> Result<String, GalleryError> {
    // Text fields are small; cap them well below the file limit
    let bytes = read_bytes(field, 64 * 1024).await?;
    String::from_utf8(bytes)
        .map_err(|_| GalleryError::InvalidInput("Form fields must be UTF-8".to_string()))
}

/// Configuration for photo routes
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/api/photos")
            .route(web::get().to(list_photos))
            .route(web::post().to(upload_photo)),
    )
    .service(web::resource("/api/photos/{id}").route(web::delete().to(delete_photo)));
}
