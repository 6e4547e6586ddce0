//! # state
//!
//! Top-level shared state injected into every axum handler: the account
//! registry, the broker gateway and the instrument index, plus one shared
//! `reqwest::Client` for all outbound HTTP.

use std::sync::Arc;

use crate::accounts::AccountRegistry;
use crate::broker::BrokerClient;
use crate::config::AppConfig;
use crate::instruments::InstrumentIndex;

pub struct AppState {
    pub config: AppConfig,
    pub accounts: AccountRegistry,
    pub broker: BrokerClient,
    pub instruments: InstrumentIndex,
    /// Shared client, also used for the scrip-master refresh.
    pub http_client: reqwest::Client,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        let http_client = reqwest::Client::new();
        let broker = BrokerClient::new(http_client.clone(), config.broker_base_url.clone());

        Self {
            config,
            accounts: AccountRegistry::new(),
            broker,
            instruments: InstrumentIndex::new(),
            http_client,
        }
    }
}

/// Convenience type alias
pub type SharedState = Arc<AppState>;

pub fn build_state(config: AppConfig) -> SharedState {
    Arc::new(AppState::new(config))
}
