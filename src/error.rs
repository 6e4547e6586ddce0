//! # error
//!
//! Centralised application error type.
//!
//! Every handler returns `Result<_, AppError>`.  Axum's `IntoResponse` impl
//! converts these into structured JSON error bodies so the frontend always
//! gets a machine-readable response even on failure.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    /// An operation that needs broker credentials ran with none linked.
    #[error("No active Dhan account linked")]
    NoActiveAccount,

    /// The broker answered with a 4xx/5xx. The raw body is preserved so the
    /// broker's own diagnostic text reaches the caller.
    #[error("Dhan API rejected the request (HTTP {status}): {body}")]
    BrokerRejected { status: u16, body: String },

    /// The broker could not be reached at all (DNS, timeout, reset).
    #[error("Dhan API unreachable: {0}")]
    Transport(String),

    /// The request payload was syntactically correct but semantically invalid.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// The requested resource does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Catch-all for unexpected failures.
    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::NoActiveAccount => StatusCode::CONFLICT,
            AppError::BrokerRejected { .. } => StatusCode::BAD_GATEWAY,
            AppError::Transport(_) => StatusCode::GATEWAY_TIMEOUT,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({
            "ok":    false,
            "error": self.to_string(),
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn broker_rejection_keeps_raw_body() {
        let err = AppError::BrokerRejected {
            status: 401,
            body: r#"{"errorType":"Invalid_Authentication"}"#.to_string(),
        };
        assert!(err.to_string().contains("Invalid_Authentication"));
        assert!(err.to_string().contains("401"));
    }
}
