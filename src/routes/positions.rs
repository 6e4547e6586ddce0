//! # routes::positions
//!
//! | Method | Path                          | Description                     |
//! |--------|-------------------------------|---------------------------------|
//! | GET    | `/api/broker/positions`       | Live open positions, normalized |
//! | POST   | `/api/broker/positions/close` | Flatten one open position       |

use axum::{extract::State, response::IntoResponse, Json};
use tracing::info;

use crate::broker::orders::{parse_ack, ClosePositionRequest, OrderPayload};
use crate::broker::positions::normalize_positions;
use crate::error::AppError;
use crate::routes::ok_response;
use crate::state::SharedState;

/// GET /api/broker/positions — fetch from the broker, normalize, and bump
/// the account's sync timestamp. Stateless otherwise: nothing is persisted.
pub async fn get_positions(
    State(state): State<SharedState>,
) -> Result<impl IntoResponse, AppError> {
    let account = state.accounts.active().await.ok_or(AppError::NoActiveAccount)?;

    let records = state.broker.positions(&account.access_token).await?;
    let positions = normalize_positions(&records);

    info!(
        raw = records.len(),
        open = positions.len(),
        "Fetched positions from Dhan"
    );

    state.accounts.mark_synced(&account.client_id).await;

    Ok(ok_response("Positions fetched successfully", positions))
}

/// POST /api/broker/positions/close — inverse market order for the given
/// position (LONG → SELL, SHORT → BUY).
pub async fn close_position(
    State(state): State<SharedState>,
    Json(request): Json<ClosePositionRequest>,
) -> Result<impl IntoResponse, AppError> {
    let account = state.accounts.active().await.ok_or(AppError::NoActiveAccount)?;

    let payload = OrderPayload::closing(&account.client_id, &request);
    let ack = state
        .broker
        .place_order(&payload, &account.access_token)
        .await?;

    let mut order = parse_ack(&ack);
    // The ack only carries the broker's order id/status; keep the human
    // symbol from the request so the front-end can label the row.
    order.symbol = Some(request.symbol.clone());

    Ok(ok_response("Position closed successfully", order))
}
