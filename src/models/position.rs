//! # models::position
//!
//! A live open position as reported by the broker, reduced to a strict shape.
//! Positions are never persisted — every fetch rebuilds them from the raw
//! broker payload (see [`crate::broker::positions`]).

use serde::{Deserialize, Serialize};

// ─── PositionSide ─────────────────────────────────────────────────────────────

/// Direction of an open position, derived from the sign of the broker's
/// signed net quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PositionSide {
    Long,
    Short,
}

// ─── Position ─────────────────────────────────────────────────────────────────

/// A normalized open position.
///
/// `quantity` is always the absolute value of the broker's `netQty`; the
/// direction lives in `position_type`. Zero-net (closed) positions never make
/// it into this struct.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    pub symbol: String,
    /// Broker-issued instrument id, needed to flatten this position later.
    pub security_id: String,
    pub exchange: String,
    pub quantity: u32,
    pub avg_price: f64,
    /// Last traded price (possibly derived, see the LTP fallback chain).
    pub ltp: f64,
    /// Realized + unrealized P&L.
    pub pnl: f64,
    pub product_type: String,
    pub position_type: PositionSide,
}
