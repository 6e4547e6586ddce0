//! # routes::account
//!
//! | Method | Path                       | Description                  |
//! |--------|----------------------------|------------------------------|
//! | POST   | `/api/broker/link-account` | Link / relink the credential |
//! | GET    | `/api/broker/account`      | The active account, if any   |

use axum::{extract::State, response::IntoResponse, Json};
use serde::Deserialize;

use crate::error::AppError;
use crate::routes::ok_response;
use crate::state::SharedState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkAccountRequest {
    pub client_id: String,
    pub access_token: String,
}

/// POST /api/broker/link-account
pub async fn link_account(
    State(state): State<SharedState>,
    Json(request): Json<LinkAccountRequest>,
) -> Result<impl IntoResponse, AppError> {
    if request.client_id.trim().is_empty() || request.access_token.trim().is_empty() {
        return Err(AppError::BadRequest(
            "clientId and accessToken are required".to_string(),
        ));
    }

    let account = state
        .accounts
        .link(request.client_id.trim(), request.access_token.trim())
        .await;

    Ok(ok_response("Dhan account linked successfully", account))
}

/// GET /api/broker/account
pub async fn get_active_account(
    State(state): State<SharedState>,
) -> Result<impl IntoResponse, AppError> {
    let account = state.accounts.active().await.ok_or(AppError::NoActiveAccount)?;
    Ok(ok_response("Active account retrieved", account))
}
