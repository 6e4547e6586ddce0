//! # routes::symbols
//!
//! | Method | Path                              | Description              |
//! |--------|-----------------------------------|--------------------------|
//! | POST   | `/api/broker/symbols/search`      | Ranked instrument search |
//! | GET    | `/api/broker/symbols/:security_id`| Exact lookup by id       |
//!
//! Symbol search rides on the instrument index alone — it works with no
//! account linked.

use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;

use crate::error::AppError;
use crate::routes::ok_response;
use crate::state::SharedState;

const DEFAULT_SEARCH_LIMIT: usize = 10;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SymbolSearchRequest {
    pub query: String,
    pub exchange: Option<String>,
    pub limit: Option<usize>,
}

/// POST /api/broker/symbols/search
pub async fn search_symbols(
    State(state): State<SharedState>,
    Json(request): Json<SymbolSearchRequest>,
) -> Result<impl IntoResponse, AppError> {
    if request.query.trim().is_empty() {
        return Err(AppError::BadRequest("query must not be empty".to_string()));
    }

    let results = state.instruments.search(
        &request.query,
        request.exchange.as_deref(),
        request.limit.unwrap_or(DEFAULT_SEARCH_LIMIT),
    );

    Ok(ok_response("Symbols found", results))
}

/// GET /api/broker/symbols/:security_id
pub async fn get_symbol(
    State(state): State<SharedState>,
    Path(security_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let instrument = state
        .instruments
        .get_by_id(&security_id)
        .ok_or_else(|| AppError::NotFound(format!("no instrument with security id {security_id}")))?;

    Ok(ok_response("Symbol found", instrument))
}
