//! # broker::orders
//!
//! Outbound order payloads and acknowledgment parsing.
//!
//! The broker wants its own `securityId` on the wire, not a human symbol —
//! callers resolve the symbol through the instrument index first and pass the
//! resolved id in the request's `symbol` field.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::broker::json::str_field;
use crate::models::{Order, OrderType, PositionSide, Side};

// ─── Inbound requests ─────────────────────────────────────────────────────────

/// Front-end request to place a fresh order.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    /// The resolved broker security id (see module docs).
    pub symbol: String,
    pub exchange: String,
    pub transaction_type: Side,
    pub quantity: u32,
    /// Required for LIMIT, ignored for MARKET.
    pub price: Option<f64>,
    pub order_type: OrderType,
    pub product_type: String,
}

/// Front-end request to flatten an open position.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClosePositionRequest {
    pub symbol: String,
    pub security_id: String,
    pub exchange: String,
    pub quantity: u32,
    pub product_type: String,
    pub position_type: PositionSide,
}

// ─── Outbound payload ─────────────────────────────────────────────────────────

/// The exact JSON shape Dhan's `POST /v2/orders` expects.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderPayload {
    pub dhan_client_id: String,
    pub transaction_type: Side,
    pub exchange_segment: String,
    pub product_type: String,
    pub order_type: OrderType,
    pub validity: &'static str,
    pub quantity: u32,
    pub security_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
}

impl OrderPayload {
    /// Build a payload from a creation request. `price` goes on the wire only
    /// for LIMIT orders.
    pub fn from_request(client_id: &str, request: &CreateOrderRequest) -> Self {
        let price = match request.order_type {
            OrderType::Limit => request.price,
            OrderType::Market => None,
        };

        Self {
            dhan_client_id: client_id.to_string(),
            transaction_type: request.transaction_type,
            exchange_segment: request.exchange.clone(),
            product_type: request.product_type.clone(),
            order_type: request.order_type,
            validity: "DAY",
            quantity: request.quantity,
            security_id: request.symbol.clone(),
            price,
        }
    }

    /// Build the market order that flattens an open position: the inverse
    /// transaction of the position's side, always MARKET.
    pub fn closing(client_id: &str, request: &ClosePositionRequest) -> Self {
        Self {
            dhan_client_id: client_id.to_string(),
            transaction_type: Side::closing(request.position_type),
            exchange_segment: request.exchange.clone(),
            product_type: request.product_type.clone(),
            order_type: OrderType::Market,
            validity: "DAY",
            quantity: request.quantity,
            security_id: request.security_id.clone(),
            price: None,
        }
    }
}

// ─── Ack parsing ──────────────────────────────────────────────────────────────

/// Extract `orderId` / `orderStatus` from the broker's response. Absent
/// fields stay `None`; nothing is synthesized.
pub fn parse_ack(response: &Value) -> Order {
    Order {
        order_id: str_field(response, "orderId"),
        status: str_field(response, "orderStatus"),
        ..Order::default()
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────
