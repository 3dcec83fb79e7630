// src/handlers/health.rs
// DOCUMENTATION: Liveness endpoint behind the access gate
// PURPOSE: The login page calls GET /health?password=... to test a password
// before storing it in the cookie, so a 200 here means "password accepted"

use actix_web::{web, HttpResponse, Responder};
use serde_json::json;

/// GET /health
pub async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(json!({
        "status": "ok",
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION")
    }))
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/health").route(web::get().to(health_check)));
}
