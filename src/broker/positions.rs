//! # broker::positions
//!
//! Position normalization: the broker's field-inconsistent position records
//! become strict [`Position`] values here.
//!
//! Rules, per record:
//! 1. `netQty == 0` → closed position, dropped.
//! 2. `quantity = |netQty|`, side from the sign.
//! 3. Average price: side-specific average → generic `avgPrice` → derived
//!    from day value / day quantity.
//! 4. P&L = realized + unrealized.
//! 5. LTP: `lastTradedPrice` → `ltp` → derived from avg price + unrealized.
//! 6. Symbol: `tradingSymbol` → `securityId`; no identity at all drops the
//!    record.
//!
//! A single malformed record never aborts the batch — it is logged and
//! skipped.

use serde_json::Value;
use tracing::warn;

use crate::broker::json::{f64_field, i64_field, str_field};
use crate::models::{Position, PositionSide};

/// Normalize a raw broker positions payload into the internal model.
pub fn normalize_positions(records: &[Value]) -> Vec<Position> {
    records
        .iter()
        .filter_map(|record| match normalize_one(record) {
            Outcome::Open(position) => Some(position),
            Outcome::Closed => None,
            Outcome::Skipped(reason) => {
                warn!(reason, raw = %record, "Skipping unusable position record");
                None
            }
        })
        .collect()
}

enum Outcome {
    Open(Position),
    /// `netQty == 0` — not an error, just nothing to show.
    Closed,
    Skipped(&'static str),
}

fn normalize_one(record: &Value) -> Outcome {
    let net_qty = i64_field(record, "netQty");
    if net_qty == 0 {
        return Outcome::Closed;
    }

    let quantity = net_qty.unsigned_abs() as u32;
    let side = if net_qty > 0 {
        PositionSide::Long
    } else {
        PositionSide::Short
    };

    let security_id = str_field(record, "securityId");
    let symbol = match str_field(record, "tradingSymbol").or_else(|| security_id.clone()) {
        Some(symbol) => symbol,
        None => return Outcome::Skipped("no tradingSymbol or securityId"),
    };

    let avg_price = resolve_avg_price(record, side);
    let unrealized = f64_field(record, "unrealizedProfit");
    let pnl = f64_field(record, "realizedProfit") + unrealized;
    let ltp = resolve_ltp(record, avg_price, unrealized, quantity);

    Outcome::Open(Position {
        symbol,
        security_id: security_id.unwrap_or_default(),
        exchange: str_field(record, "exchangeSegment").unwrap_or_default(),
        quantity,
        avg_price,
        ltp,
        pnl,
        product_type: str_field(record, "productType").unwrap_or_default(),
        position_type: side,
    })
}

/// First non-zero wins: side-specific average, generic average, then the
/// day-value / day-quantity derivation for the matching side.
fn resolve_avg_price(record: &Value, side: PositionSide) -> f64 {
    let side_avg = match side {
        PositionSide::Long => f64_field(record, "buyAvg"),
        PositionSide::Short => f64_field(record, "sellAvg"),
    };
    if side_avg != 0.0 {
        return side_avg;
    }

    let generic = f64_field(record, "avgPrice");
    if generic != 0.0 {
        return generic;
    }

    let (value_key, qty_key) = match side {
        PositionSide::Long => ("dayBuyValue", "dayBuyQty"),
        PositionSide::Short => ("daySellValue", "daySellQty"),
    };
    let day_qty = i64_field(record, qty_key);
    if day_qty > 0 {
        f64_field(record, value_key) / day_qty as f64
    } else {
        0.0
    }
}

/// `lastTradedPrice` → `ltp` → derived from average price and unrealized P&L
/// when both quantity and average price are usable.
fn resolve_ltp(record: &Value, avg_price: f64, unrealized: f64, quantity: u32) -> f64 {
    let direct = f64_field(record, "lastTradedPrice");
    if direct != 0.0 {
        return direct;
    }

    let short_key = f64_field(record, "ltp");
    if short_key != 0.0 {
        return short_key;
    }

    if quantity > 0 && avg_price > 0.0 {
        avg_price + unrealized / quantity as f64
    } else {
        0.0
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn zero_net_quantity_is_excluded() {
        let records = vec![
            json!({ "tradingSymbol": "TCS", "netQty": 0 }),
            json!({ "tradingSymbol": "INFY", "netQty": 10, "buyAvg": 1500.0 }),
        ];
        let positions = normalize_positions(&records);
        assert_eq!(positions.len(), 1);
        assert_eq!(positions[0].symbol, "INFY");
    }

    #[test]
    fn quantity_is_absolute_and_side_matches_sign() {
        let records = vec![
            json!({ "tradingSymbol": "TCS", "netQty": 25, "buyAvg": 3400.0 }),
            json!({ "tradingSymbol": "RELIANCE", "netQty": -40, "sellAvg": 2900.0 }),
        ];
        let positions = normalize_positions(&records);

        assert_eq!(positions[0].quantity, 25);
        assert_eq!(positions[0].position_type, PositionSide::Long);
        assert_eq!(positions[1].quantity, 40);
        assert_eq!(positions[1].position_type, PositionSide::Short);
    }

    #[test]
    fn avg_price_falls_back_to_day_value_derivation() {
        let records = vec![json!({
            "tradingSymbol": "SBIN",
            "netQty": 10,
            "dayBuyValue": 5000.0,
            "dayBuyQty": 10,
        })];
        let positions = normalize_positions(&records);
        assert_eq!(positions[0].avg_price, 500.0);
    }

    #[test]
    fn short_side_uses_sell_average_then_generic() {
        let records = vec![
            json!({ "tradingSymbol": "A", "netQty": -5, "sellAvg": 120.0, "avgPrice": 99.0 }),
            json!({ "tradingSymbol": "B", "netQty": -5, "sellAvg": 0.0, "avgPrice": 99.0 }),
            json!({ "tradingSymbol": "C", "netQty": -5, "daySellValue": 600.0, "daySellQty": 5 }),
        ];
        let positions = normalize_positions(&records);
        assert_eq!(positions[0].avg_price, 120.0);
        assert_eq!(positions[1].avg_price, 99.0);
        assert_eq!(positions[2].avg_price, 120.0);
    }

    #[test]
    fn pnl_sums_realized_and_unrealized_with_defaults() {
        let records = vec![json!({
            "tradingSymbol": "TCS",
            "netQty": 1,
            "buyAvg": 3400.0,
            "realizedProfit": 150.5,
            "unrealizedProfit": -50.5,
        })];
        let positions = normalize_positions(&records);
        assert_eq!(positions[0].pnl, 100.0);

        let bare = vec![json!({ "tradingSymbol": "TCS", "netQty": 1, "buyAvg": 1.0 })];
        assert_eq!(normalize_positions(&bare)[0].pnl, 0.0);
    }

    #[test]
    fn ltp_chain_prefers_direct_fields_then_derives() {
        let records = vec![
            json!({ "tradingSymbol": "A", "netQty": 1, "buyAvg": 100.0,
                    "lastTradedPrice": 105.0, "ltp": 90.0 }),
            json!({ "tradingSymbol": "B", "netQty": 1, "buyAvg": 100.0, "ltp": 104.0 }),
            json!({ "tradingSymbol": "C", "netQty": 10, "buyAvg": 100.0,
                    "unrealizedProfit": 50.0 }),
        ];
        let positions = normalize_positions(&records);
        assert_eq!(positions[0].ltp, 105.0);
        assert_eq!(positions[1].ltp, 104.0);
        // 100 + 50/10
        assert_eq!(positions[2].ltp, 105.0);
    }

    #[test]
    fn symbol_falls_back_to_security_id() {
        let records = vec![json!({ "securityId": 11536, "netQty": 5, "buyAvg": 10.0 })];
        let positions = normalize_positions(&records);
        assert_eq!(positions[0].symbol, "11536");
        assert_eq!(positions[0].security_id, "11536");
    }

    #[test]
    fn record_without_any_identity_is_skipped_not_fatal() {
        let records = vec![
            json!({ "netQty": 5 }),
            json!("not even an object"),
            json!({ "tradingSymbol": "GOOD", "netQty": 1, "buyAvg": 10.0 }),
        ];
        let positions = normalize_positions(&records);
        assert_eq!(positions.len(), 1);
        assert_eq!(positions[0].symbol, "GOOD");
    }

    #[test]
    fn numeric_strings_are_coerced() {
        let records = vec![json!({
            "tradingSymbol": "TCS",
            "netQty": "15",
            "buyAvg": "3400.50",
        })];
        let positions = normalize_positions(&records);
        assert_eq!(positions[0].quantity, 15);
        assert_eq!(positions[0].avg_price, 3400.50);
    }
}
