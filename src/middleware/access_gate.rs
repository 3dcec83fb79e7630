// src/middleware/access_gate.rs
// DOCUMENTATION: Shared-password gate in front of every route
// PURPOSE: Accept the password from query, cookie or Basic auth; otherwise serve the login page

use actix_web::{
    body::{EitherBody, MessageBody},
    dev::{ServiceRequest, ServiceResponse},
    http::header::{self, ContentType},
    middleware::Next,
    web, Error, HttpRequest, HttpResponse,
};
use ct_codecs::{Base64, Decoder};
use serde::Deserialize;

/// Cookie the login page stores the password in
pub const AUTH_COOKIE: &str = "event_auth";

const LOGIN_PAGE: &str = include_str!("login.html");

#[derive(Debug, Deserialize)]
struct PasswordQuery {
    password: Option<String>,
}

/// The single secret every guest shares
/// DOCUMENTATION: Plaintext comparison, no lockout. Registered as app data so
/// the middleware can reach it.
#[derive(Clone)]
pub struct AccessGate {
    password: String,
}

impl AccessGate {
    pub fn new(password: impl Into<String>) -> Self {
        Self {
            password: password.into(),
        }
    }

    /// True if any accepted credential carries the password
    pub fn authorizes(&self, req: &HttpRequest) -> bool {
        self.query_matches(req) || self.cookie_matches(req) || self.basic_matches(req)
    }

    fn query_matches(&self, req: &HttpRequest) -> bool {
        web::Query::<PasswordQuery>::from_query(req.query_string())
            .ok()
            .and_then(|q| q.into_inner().password)
            .map_or(false, |p| p == self.password)
    }

    fn cookie_matches(&self, req: &HttpRequest) -> bool {
        req.cookie(AUTH_COOKIE)
            .map_or(false, |c| c.value() == self.password)
    }

    fn basic_matches(&self, req: &HttpRequest) -> bool {
        req.headers()
            .get(header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .and_then(basic_password)
            .map_or(false, |p| p == self.password)
    }
}

/// Password part of a `Basic` credential: everything after the first colon,
/// or the whole decoded value when it has no colon
fn basic_password(header_value: &str) -> Option<String> {
    let encoded = header_value.strip_prefix("Basic ")?.trim();
    let decoded = Base64::decode_to_vec(encoded, None).ok()?;
    let decoded = String::from_utf8_lossy(&decoded);

    let password = match decoded.split_once(':') {
        Some((_, pass)) => pass,
        None => &*decoded,
    };
    Some(password.to_string())
}

/// Middleware wrapping the whole app
pub async fn require_password<B: MessageBody>(
    req: ServiceRequest,
    next: Next<B>,
) -> Result<ServiceResponse<EitherBody<B>>, Error> {
    let allowed = req
        .app_data::<web::Data<AccessGate>>()
        .map_or(false, |gate| gate.authorizes(req.request()));

    if allowed {
        return Ok(next.call(req).await?.map_into_left_body());
    }

    log::warn!("Unauthenticated request to {}", req.path());
    let response = HttpResponse::Unauthorized()
        .content_type(ContentType::html())
        .body(LOGIN_PAGE);

    Ok(req.into_response(response).map_into_right_body())
}
