//! # instruments — Scrip Master Index
//!
//! In-memory index of every tradable instrument, loaded from Dhan's bulk
//! scrip-master CSV. The whole set is replaced atomically on each load:
//! `search` either sees the previous complete snapshot or the new complete
//! snapshot, never a half-populated one. A failed load keeps the last good
//! snapshot serving.

use std::sync::{Arc, RwLock};

use anyhow::Context;
use csv::ReaderBuilder;
use tracing::info;

use crate::models::instrument::{DEFAULT_LOT_SIZE, DEFAULT_TICK_SIZE};
use crate::models::Instrument;

#[derive(Default)]
pub struct InstrumentIndex {
    snapshot: RwLock<Arc<Vec<Instrument>>>,
}

impl InstrumentIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch the scrip master and swap in the parsed snapshot.
    ///
    /// This is the explicit load lifecycle step: `main` spawns it at startup,
    /// tests await it directly. On any failure the previous snapshot stays in
    /// place and the error is returned for the caller to log.
    pub async fn refresh(&self, http: &reqwest::Client, url: &str) -> anyhow::Result<usize> {
        info!(%url, "Loading scrip master from Dhan");

        let body = http
            .get(url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .context("scrip master fetch failed")?
            .text()
            .await
            .context("scrip master body read failed")?;

        let instruments = parse_scrip_master(&body)?;
        let count = instruments.len();
        self.install(instruments);

        info!(count, "Scrip master loaded");
        Ok(count)
    }

    /// Atomically replace the snapshot.
    pub fn install(&self, instruments: Vec<Instrument>) {
        let mut guard = self.snapshot.write().unwrap_or_else(|e| e.into_inner());
        *guard = Arc::new(instruments);
    }

    fn current(&self) -> Arc<Vec<Instrument>> {
        self.snapshot
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    pub fn len(&self) -> usize {
        self.current().len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.current().is_empty()
    }

    /// Ranked substring search over trading symbols and names.
    ///
    /// Ranking precedence: exact symbol match, then EQUITY instruments, then
    /// shorter symbols, then lexical symbol order.
    pub fn search(&self, query: &str, exchange: Option<&str>, limit: usize) -> Vec<Instrument> {
        let snapshot = self.current();
        let query = query.trim().to_uppercase();
        if query.is_empty() {
            return Vec::new();
        }

        let exchange = exchange.map(str::trim).filter(|e| !e.is_empty());

        let mut matches: Vec<&Instrument> = snapshot
            .iter()
            .filter(|inst| {
                let exchange_ok = exchange
                    .map(|e| inst.exchange_segment.starts_with(e))
                    .unwrap_or(true);
                exchange_ok
                    && (inst.trading_symbol.to_uppercase().contains(&query)
                        || inst.name.to_uppercase().contains(&query))
            })
            .collect();

        matches.sort_by_key(|inst| {
            (
                inst.trading_symbol.to_uppercase() != query,
                inst.instrument_type != "EQUITY",
                inst.trading_symbol.len(),
                inst.trading_symbol.clone(),
            )
        });

        matches.into_iter().take(limit).cloned().collect()
    }

    /// Exact lookup by broker security id.
    pub fn get_by_id(&self, security_id: &str) -> Option<Instrument> {
        self.current()
            .iter()
            .find(|inst| inst.security_id == security_id)
            .cloned()
    }
}

// ─── CSV parsing ──────────────────────────────────────────────────────────────

/// Parse the scrip-master CSV into instruments.
///
/// Column layout (header row skipped):
/// 0 exchange, 1 segment, 2 security id, 3 instrument type, 4 name,
/// 5 trading symbol, then optionally 7 tick size and 8 lot size. Rows with
/// fewer than six columns are dropped; unparseable numeric columns fall back
/// to defaults without discarding the row.
pub fn parse_scrip_master(source: &str) -> anyhow::Result<Vec<Instrument>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(source.as_bytes());

    let mut instruments = Vec::new();
    for row in reader.records() {
        let record = row.context("invalid scrip master row")?;
        if record.len() < 6 {
            continue;
        }

        let column = |i: usize| record.get(i).unwrap_or("").trim().to_string();

        instruments.push(Instrument {
            // Column 0 holds the bare exchange id ("NSE"); using it as the
            // segment keeps the starts-with filter working for callers that
            // pass either "NSE" or "NSE_EQ"-style prefixes.
            exchange_segment: column(0),
            security_id: column(2),
            instrument_type: column(3),
            name: column(4),
            trading_symbol: column(5),
            tick_size: record
                .get(7)
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(DEFAULT_TICK_SIZE),
            lot_size: record
                .get(8)
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(DEFAULT_LOT_SIZE),
        });
    }

    Ok(instruments)
}

// ─── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str =
        "EXCH_ID,SEGMENT,SECURITY_ID,INSTRUMENT_TYPE,INSTRUMENT_NAME,TRADING_SYMBOL,SERIES,TICK_SIZE,LOT_SIZE\n";

    fn sample_csv() -> String {
        format!(
            "{HEADER}\
             NSE,E,11536,EQUITY,Tata Consultancy Services,TCS,EQ,0.05,1\n\
             NSE,E,99001,EQUITY,TCS Logistics Ltd,TCSL,EQ,0.05,1\n\
             NSE,D,35021,FUTIDX,Tata Consultancy Futures,TCS-FUT,XX,0.05,125\n\
             BSE,E,500325,EQUITY,Reliance Industries,RELIANCE,A,0.05,1\n"
        )
    }

    fn loaded_index() -> InstrumentIndex {
        let index = InstrumentIndex::new();
        index.install(parse_scrip_master(&sample_csv()).unwrap());
        index
    }

    #[test]
    fn parse_skips_header_and_short_rows() {
        let csv = format!("{HEADER}NSE,E\nNSE,E,1,EQUITY,Some Name,SOME,EQ,0.05,1\n");
        let instruments = parse_scrip_master(&csv).unwrap();
        assert_eq!(instruments.len(), 1);
        assert_eq!(instruments[0].trading_symbol, "SOME");
    }

    #[test]
    fn malformed_numeric_columns_fall_back_without_dropping_row() {
        let csv = format!("{HEADER}NSE,E,1,EQUITY,Some Name,SOME,EQ,not-a-number,zero\n");
        let instruments = parse_scrip_master(&csv).unwrap();
        assert_eq!(instruments.len(), 1);
        assert_eq!(instruments[0].tick_size, DEFAULT_TICK_SIZE);
        assert_eq!(instruments[0].lot_size, DEFAULT_LOT_SIZE);
    }

    #[test]
    fn missing_optional_columns_use_defaults() {
        let csv = format!("{HEADER}NSE,E,1,EQUITY,Some Name,SOME\n");
        let instruments = parse_scrip_master(&csv).unwrap();
        assert_eq!(instruments[0].tick_size, DEFAULT_TICK_SIZE);
        assert_eq!(instruments[0].lot_size, DEFAULT_LOT_SIZE);
    }

    #[test]
    fn search_ranks_exact_then_equity_then_length() {
        let index = loaded_index();
        let results = index.search("TCS", None, 10);
        let symbols: Vec<&str> = results.iter().map(|i| i.trading_symbol.as_str()).collect();
        assert_eq!(symbols, vec!["TCS", "TCSL", "TCS-FUT"]);
    }

    #[test]
    fn search_matches_names_case_insensitively() {
        let index = loaded_index();
        let results = index.search("reliance", None, 10);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].trading_symbol, "RELIANCE");
    }

    #[test]
    fn exchange_filter_is_a_prefix_match() {
        let index = loaded_index();
        assert_eq!(index.search("TCS", Some("NSE"), 10).len(), 3);
        assert!(index.search("TCS", Some("BSE"), 10).is_empty());
        // Blank filter means no filter.
        assert_eq!(index.search("TCS", Some(""), 10).len(), 3);
    }

    #[test]
    fn search_truncates_to_limit() {
        let index = loaded_index();
        assert_eq!(index.search("TCS", None, 2).len(), 2);
    }

    #[test]
    fn get_by_id_is_exact() {
        let index = loaded_index();
        assert_eq!(index.get_by_id("11536").unwrap().trading_symbol, "TCS");
        assert!(index.get_by_id("1153").is_none());
    }

    #[test]
    fn failed_parse_leaves_previous_snapshot_serving() {
        let index = loaded_index();
        assert_eq!(index.len(), 4);

        // Unbalanced quote makes the reader error out mid-file.
        let broken = format!("{HEADER}NSE,E,1,EQUITY,\"broken,ROW,EQ\n");
        if let Ok(instruments) = parse_scrip_master(&broken) {
            // Even if the reader tolerates it, nothing was installed yet.
            drop(instruments);
        }
        assert_eq!(index.len(), 4);
        assert!(index.get_by_id("11536").is_some());
    }
}
