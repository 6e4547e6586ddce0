//! # routes::orders
//!
//! | Method | Path                            | Description            |
//! |--------|---------------------------------|------------------------|
//! | POST   | `/api/broker/orders`            | Place an order         |
//! | DELETE | `/api/broker/orders/:order_id`  | Cancel a pending order |

use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};

use crate::broker::orders::{parse_ack, CreateOrderRequest, OrderPayload};
use crate::error::AppError;
use crate::models::OrderType;
use crate::routes::ok_response;
use crate::state::SharedState;

/// POST /api/broker/orders
pub async fn create_order(
    State(state): State<SharedState>,
    Json(request): Json<CreateOrderRequest>,
) -> Result<impl IntoResponse, AppError> {
    if request.order_type == OrderType::Limit && request.price.is_none() {
        return Err(AppError::BadRequest(
            "price is required for LIMIT orders".to_string(),
        ));
    }

    let account = state.accounts.active().await.ok_or(AppError::NoActiveAccount)?;

    let payload = OrderPayload::from_request(&account.client_id, &request);
    let ack = state
        .broker
        .place_order(&payload, &account.access_token)
        .await?;

    Ok(ok_response("Order created successfully", parse_ack(&ack)))
}

/// DELETE /api/broker/orders/:order_id
pub async fn close_order(
    State(state): State<SharedState>,
    Path(order_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let account = state.accounts.active().await.ok_or(AppError::NoActiveAccount)?;

    let ack = state
        .broker
        .cancel_order(&order_id, &account.access_token)
        .await?;

    Ok(ok_response("Order closed successfully", parse_ack(&ack)))
}
