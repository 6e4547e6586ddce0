//! # models::order
//!
//! Order types: the broker-facing enums (`Side`, `OrderType`) and the
//! acknowledged [`Order`] returned after placing or cancelling.

use serde::{Deserialize, Serialize};

use crate::models::PositionSide;

// ─── Side ─────────────────────────────────────────────────────────────────────

/// Transaction direction as the broker expects it on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    /// The transaction that flattens a position on the given side.
    pub fn closing(side: PositionSide) -> Self {
        match side {
            PositionSide::Long => Side::Sell,
            PositionSide::Short => Side::Buy,
        }
    }
}

// ─── OrderType ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderType {
    Market,
    Limit,
}

// ─── Order ────────────────────────────────────────────────────────────────────

/// An order as acknowledged by the broker.
///
/// Only the fields the broker actually returned are populated; nothing here
/// is synthesized. An ack that carries no `orderId` stays `None`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub order_id: Option<String>,
    pub symbol: Option<String>,
    pub exchange: Option<String>,
    pub transaction_type: Option<Side>,
    pub quantity: Option<u32>,
    pub price: Option<f64>,
    pub order_type: Option<OrderType>,
    pub product_type: Option<String>,
    pub status: Option<String>,
    pub timestamp: Option<String>,
}
