// src/handlers/mod.rs
// DOCUMENTATION: Handlers module organization
// PURPOSE: Re-export handler components

pub mod comments;
pub mod health;
pub mod photos;
pub mod updates;

pub use comments::config as comments_config;
pub use health::config as health_config;
pub use photos::config as photos_config;
pub use updates::config as updates_config;

use crate::errors::GalleryError;
use actix_web::web;
use uuid::Uuid;

/// Route ids are taken as raw strings; anything that is not a UUID cannot
/// name a stored record
pub(crate) fn parse_id(raw: &str) -> Option<Uuid> {
    Uuid::parse_str(raw.trim()).ok()
}

/// Malformed or oversized JSON bodies become 400s with a JSON error
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        GalleryError::InvalidInput(format!("Invalid JSON body: {}", err)).into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{JsonFileStore, RecordStore};
    use crate::middleware::{require_password, AccessGate, AUTH_COOKIE};
    use crate::models::{Comment, Photo, Update};
    use crate::storage::LocalBlobStore;
    use crate::AppState;
    use actix_web::{
        cookie::Cookie,
        http::{header, StatusCode},
        middleware::from_fn,
        test, App,
    };
    use serde_json::json;
    use std::sync::Arc;

    const BOUNDARY: &str = "----eventgalleryboundary";

    struct Fixture {
        _dir: tempfile::TempDir,
        state: AppState,
        uploads: std::path::PathBuf,
    }

    async fn fixture() -> Fixture {
        let dir = tempfile::tempdir().unwrap();
        let uploads = dir.path().join("uploads");
        let records = JsonFileStore::open(dir.path().join("data")).await.unwrap();
        let blobs = LocalBlobStore::open(&uploads).await.unwrap();

        Fixture {
            state: AppState {
                records: Arc::new(records),
                blobs: Arc::new(blobs),
            },
            uploads,
            _dir: dir,
        }
    }

    macro_rules! app {
        ($fixture:expr) => {
            test::init_service(
                App::new()
                    .app_data(web::Data::new($fixture.state.clone()))
                    .app_data(web::Data::new(AccessGate::new("secret")))
                    .app_data(json_config())
                    .wrap(from_fn(require_password))
                    .configure(health_config)
                    .configure(comments_config)
                    .configure(photos_config)
                    .configure(updates_config),
            )
            .await
        };
    }

    fn authed(req: test::TestRequest) -> test::TestRequest {
        req.cookie(Cookie::new(AUTH_COOKIE, "secret"))
    }

    enum Part<'a> {
        Text(&'a str, &'a str),
        File(&'a str, &'a str, &'a [u8]),
    }

    fn multipart(parts: &[Part]) -> test::TestRequest {
        let mut body = Vec::new();
        for part in parts {
            body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
            match part {
                Part::Text(name, value) => {
                    body.extend_from_slice(
                        format!(
                            "Content-Disposition: form-data; name=\"{}\"\r\n\r\n{}\r\n",
                            name, value
                        )
                        .as_bytes(),
                    );
                }
                Part::File(filename, content_type, bytes) => {
                    body.extend_from_slice(
                        format!(
                            "Content-Disposition: form-data; name=\"photo\"; filename=\"{}\"\r\nContent-Type: {}\r\n\r\n",
                            filename, content_type
                        )
                        .as_bytes(),
                    );
                    body.extend_from_slice(bytes);
                    body.extend_from_slice(b"\r\n");
                }
            }
        }
        body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());

        authed(test::TestRequest::post().uri("/api/photos"))
            .insert_header((
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={}", BOUNDARY),
            ))
            .set_payload(body)
    }

    #[actix_web::test]
    async fn test_api_requires_password() {
        let fx = fixture().await;
        let app = app!(fx);

        for uri in ["/api/photos", "/api/updates", "/health"] {
            let resp = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
            assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
            let content_type = resp.headers().get(header::CONTENT_TYPE).unwrap();
            assert!(content_type.to_str().unwrap().starts_with("text/html"));
        }

        let resp = test::call_service(
            &app,
            test::TestRequest::get().uri("/health?password=secret").to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn test_upload_without_file_is_rejected() {
        let fx = fixture().await;
        let app = app!(fx);

        let req = multipart(&[Part::Text("caption", "Dance floor"), Part::Text("uploaderName", "Alice")]);
        let resp = test::call_service(&app, req.to_request()).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "No file uploaded");

        assert!(fx.state.records.list_photos().await.unwrap().is_empty());
    }

    #[actix_web::test]
    async fn test_upload_rejects_disallowed_type() {
        let fx = fixture().await;
        let app = app!(fx);

        let req = multipart(&[Part::File("notes.txt", "text/plain", b"hello")]);
        let resp = test::call_service(&app, req.to_request()).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        assert!(fx.state.records.list_photos().await.unwrap().is_empty());
        assert_eq!(std::fs::read_dir(&fx.uploads).unwrap().count(), 0);
    }

    #[actix_web::test]
    async fn test_photo_upload_and_owner_delete() {
        let fx = fixture().await;
        let app = app!(fx);

        let req = multipart(&[
            Part::Text("caption", "Cutting the cake"),
            Part::Text("uploaderName", "Alice"),
            Part::File("cake.jpg", "image/jpeg", &[0xff, 0xd8, 0xff, 0xe0]),
        ]);
        let resp = test::call_service(&app, req.to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let photo: Photo = test::read_body_json(resp).await;
        assert_eq!(photo.uploader_name, "Alice");
        assert_eq!(photo.caption, "Cutting the cake");
        assert_eq!(photo.original_name, "cake.jpg");
        assert!(photo.filename.starts_with("/uploads/"));
        assert!(fx.uploads.join(&photo.storage_id).exists());

        let uri = format!("/api/photos/{}", photo.id);

        let req = authed(test::TestRequest::delete().uri(&uri))
            .set_json(json!({ "uploaderName": "Bob" }))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::FORBIDDEN);

        let req = authed(test::TestRequest::get().uri("/api/photos")).to_request();
        let listed: Vec<Photo> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(listed, vec![photo.clone()]);

        let req = authed(test::TestRequest::delete().uri(&uri))
            .set_json(json!({ "uploaderName": "  ALICE " }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["success"], true);

        let req = authed(test::TestRequest::get().uri("/api/photos")).to_request();
        let listed: Vec<Photo> = test::call_and_read_body_json(&app, req).await;
        assert!(listed.is_empty());
        assert!(!fx.uploads.join(&photo.storage_id).exists());

        let req = authed(test::TestRequest::delete().uri(&uri))
            .set_json(json!({ "uploaderName": "Alice" }))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn test_comments_flow() {
        let fx = fixture().await;
        let app = app!(fx);

        let req = multipart(&[Part::File("toast.png", "image/png", b"\x89PNG")]);
        let photo: Photo = test::call_and_read_body_json(&app, req.to_request()).await;
        let uri = format!("/api/photos/{}/comments", photo.id);

        let req = authed(test::TestRequest::post().uri(&uri))
            .set_json(json!({ "text": "   ", "authorName": "Sam" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "Comment text required");

        for text in ["first", "second", "third"] {
            let req = authed(test::TestRequest::post().uri(&uri))
                .set_json(json!({ "text": format!("  {}  ", text) }))
                .to_request();
            let comment: Comment = test::call_and_read_body_json(&app, req).await;
            assert_eq!(comment.text, text);
            assert_eq!(comment.author_name, "Anonymous");
        }

        let req = authed(test::TestRequest::get().uri(&uri)).to_request();
        let comments: Vec<Comment> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(comments.len(), 3);
        assert!(comments.windows(2).all(|w| w[0].date <= w[1].date));
        assert!(comments.iter().all(|c| c.photo_id == photo.id));
    }

    #[actix_web::test]
    async fn test_comment_on_unknown_photo() {
        let fx = fixture().await;
        let app = app!(fx);

        let uri = format!("/api/photos/{}/comments", uuid::Uuid::new_v4());
        let req = authed(test::TestRequest::post().uri(&uri))
            .set_json(json!({ "text": "Hello?" }))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);

        let req = authed(test::TestRequest::get().uri(&uri)).to_request();
        let comments: Vec<Comment> = test::call_and_read_body_json(&app, req).await;
        assert!(comments.is_empty());
    }

    #[actix_web::test]
    async fn test_update_round_trip() {
        let fx = fixture().await;
        let app = app!(fx);

        let req = authed(test::TestRequest::post().uri("/api/updates"))
            .set_json(json!({ "title": "Save the Date", "content": "See you in June!" }))
            .to_request();
        let created: Update = test::call_and_read_body_json(&app, req).await;
        assert_eq!(created.category, "general");

        let req = authed(test::TestRequest::get().uri("/api/updates")).to_request();
        let listed: Vec<Update> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, created.id);
        assert_eq!(listed[0].title, "Save the Date");
        assert_eq!(listed[0].content, "See you in June!");
        assert_eq!(listed[0].date, created.date);

        // No ownership on updates: a Basic-auth caller may delete it
        let req = test::TestRequest::delete()
            .uri(&format!("/api/updates/{}", created.id))
            .insert_header((header::AUTHORIZATION, "Basic Z3Vlc3Q6c2VjcmV0"))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

        let req = authed(test::TestRequest::get().uri("/api/updates")).to_request();
        let listed: Vec<Update> = test::call_and_read_body_json(&app, req).await;
        assert!(listed.is_empty());
    }

    #[actix_web::test]
    async fn test_update_validation() {
        let fx = fixture().await;
        let app = app!(fx);

        let req = authed(test::TestRequest::post().uri("/api/updates"))
            .set_json(json!({ "title": "Missing content" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "Title and content required");

        let req = authed(test::TestRequest::post().uri("/api/updates"))
            .insert_header((header::CONTENT_TYPE, "application/json"))
            .set_payload("{not json")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert!(body["error"].as_str().unwrap().starts_with("Invalid JSON body"));

        assert!(fx.state.records.list_updates().await.unwrap().is_empty());
    }

    #[actix_web::test]
    async fn test_delete_unknown_update_succeeds() {
        let fx = fixture().await;
        let app = app!(fx);

        let req = authed(test::TestRequest::delete().uri(&format!("/api/updates/{}", uuid::Uuid::new_v4())))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["success"], true);
    }

    #[actix_web::test]
    async fn test_non_uuid_ids() {
        let fx = fixture().await;
        let app = app!(fx);

        let req = authed(test::TestRequest::delete().uri("/api/updates/abc")).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["success"], true);

        let req = authed(test::TestRequest::get().uri("/api/photos/abc/comments")).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let comments: Vec<Comment> = test::read_body_json(resp).await;
        assert!(comments.is_empty());

        let not_found = [
            authed(test::TestRequest::delete().uri("/api/photos/abc"))
                .set_json(json!({ "uploaderName": "Alice" }))
                .to_request(),
            authed(test::TestRequest::post().uri("/api/photos/abc/comments"))
                .set_json(json!({ "text": "Hello?" }))
                .to_request(),
        ];
        for req in not_found {
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::NOT_FOUND);
            let content_type = resp.headers().get(header::CONTENT_TYPE).unwrap();
            assert_eq!(content_type.to_str().unwrap(), "application/json");
            let body: serde_json::Value = test::read_body_json(resp).await;
            assert_eq!(body["error"], "Photo not found");
        }
    }

    #[::core::prelude::v1::test]
    fn test_parse_id() {
        let id = Uuid::new_v4();
        assert_eq!(parse_id(&id.to_string()), Some(id));
        assert_eq!(parse_id("abc"), None);
        assert_eq!(parse_id(""), None);
    }
}
