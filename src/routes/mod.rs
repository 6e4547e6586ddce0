//! # routes
//!
//! Axum handlers: the mechanical forwarding layer. Each handler pulls the
//! active credential, delegates to the broker gateway / normalizers, and
//! wraps the result as `{ok, message, data}`. No decision logic lives here.

pub mod account;
pub mod orders;
pub mod positions;
pub mod symbols;

use axum::{extract::State, Json};
use serde::Serialize;
use serde_json::{json, Value};

use crate::state::SharedState;

/// Uniform success envelope.
pub(crate) fn ok_response(message: &str, data: impl Serialize) -> Json<Value> {
    Json(json!({
        "ok":      true,
        "message": message,
        "data":    data,
    }))
}

/// GET /health — liveness probe, auth-exempt. Reports how many instruments
/// the index currently serves so operators can spot a failed scrip load.
pub async fn health_check(State(state): State<SharedState>) -> Json<Value> {
    Json(json!({
        "ok":          true,
        "service":     "dhanbridge",
        "instruments": state.instruments.len(),
    }))
}
