//! # models::instrument
//!
//! One row of the Dhan scrip master: a tradable instrument with its
//! exchange-issued security id and human trading symbol.

use serde::Serialize;

/// Default tick size applied when the scrip master column is missing or
/// unparseable.
pub const DEFAULT_TICK_SIZE: f64 = 0.05;

/// Default lot size applied when the scrip master column is missing or
/// unparseable.
pub const DEFAULT_LOT_SIZE: u32 = 1;

/// Immutable once loaded; the full set forms an in-memory index that is
/// rebuilt wholesale on each load.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Instrument {
    pub security_id: String,
    pub trading_symbol: String,
    pub name: String,
    pub exchange_segment: String,
    pub instrument_type: String,
    pub tick_size: f64,
    pub lot_size: u32,
}
