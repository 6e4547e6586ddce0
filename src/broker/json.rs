//! # broker::json
//!
//! Tolerant field access on the broker's loosely-typed JSON.
//!
//! Dhan payloads mix numbers, numeric strings and outright missing keys for
//! the same logical field depending on segment and product type. These
//! helpers coerce rather than fail: a bad field becomes `0` / `None`, never
//! an error that would abort the whole batch.

use serde_json::Value;

/// Field as a non-empty string. Numbers are stringified (the broker reports
/// `securityId` both ways); empty strings and `null` count as absent.
pub fn str_field(record: &Value, key: &str) -> Option<String> {
    match record.get(key) {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    }
}

/// Field as f64, coercing numeric strings; anything else is `0.0`.
pub fn f64_field(record: &Value, key: &str) -> f64 {
    match record.get(key) {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    }
}

/// Field as i64, coercing numeric strings and truncating floats; anything
/// else is `0`.
pub fn i64_field(record: &Value, key: &str) -> i64 {
    match record.get(key) {
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .unwrap_or(0),
        Some(Value::String(s)) => {
            let trimmed = s.trim();
            trimmed
                .parse::<i64>()
                .or_else(|_| trimmed.parse::<f64>().map(|f| f as i64))
                .unwrap_or(0)
        }
        _ => 0,
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn str_field_stringifies_numbers() {
        let record = json!({ "securityId": 11536 });
        assert_eq!(str_field(&record, "securityId").as_deref(), Some("11536"));
    }

    #[test]
    fn str_field_treats_blank_as_absent() {
        let record = json!({ "tradingSymbol": "   ", "other": null });
        assert_eq!(str_field(&record, "tradingSymbol"), None);
        assert_eq!(str_field(&record, "other"), None);
        assert_eq!(str_field(&record, "missing"), None);
    }

    #[test]
    fn f64_field_coerces_strings_and_defaults() {
        let record = json!({ "buyAvg": "3450.75", "junk": {}, "ltp": 101.5 });
        assert_eq!(f64_field(&record, "buyAvg"), 3450.75);
        assert_eq!(f64_field(&record, "ltp"), 101.5);
        assert_eq!(f64_field(&record, "junk"), 0.0);
        assert_eq!(f64_field(&record, "missing"), 0.0);
    }

    #[test]
    fn i64_field_handles_floats_and_garbage() {
        let record = json!({ "netQty": "-25", "fuzzy": 10.9, "bad": "abc" });
        assert_eq!(i64_field(&record, "netQty"), -25);
        assert_eq!(i64_field(&record, "fuzzy"), 10);
        assert_eq!(i64_field(&record, "bad"), 0);
    }
}
