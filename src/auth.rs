//! # auth — API Key Middleware
//!
//! Guards every endpoint with an `X-API-Key` header.
//!
//! ## Mode
//! - `API_KEY` unset (or empty) → **Allow All** (dev mode)
//! - `API_KEY` set → every request must send `X-API-Key: <key>`
//!
//! `/health` is always exempt so load balancers can probe without the key.

use axum::{
    body::Body,
    extract::Request,
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use tracing::warn;

pub async fn require_api_key(request: Request<Body>, next: Next) -> Response {
    let api_key_env = std::env::var("API_KEY").unwrap_or_default();

    if api_key_env.is_empty() {
        return next.run(request).await;
    }

    if request.uri().path() == "/health" {
        return next.run(request).await;
    }

    let provided = request
        .headers()
        .get("X-API-Key")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");

    if provided == api_key_env {
        next.run(request).await
    } else {
        warn!(path = request.uri().path(), "Unauthorized request — invalid or missing X-API-Key");
        (
            StatusCode::UNAUTHORIZED,
            Json(serde_json::json!({
                "ok":    false,
                "error": "Unauthorized: invalid or missing X-API-Key header",
            })),
        )
            .into_response()
    }
}
