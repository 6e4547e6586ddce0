//! # config
//!
//! Environment-driven configuration. Every knob has a sane default so the
//! server comes up with nothing but a `.env` containing broker credentials.

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Base URL of the Dhan REST API.
    pub broker_base_url: String,
    /// URL of the bulk scrip master CSV.
    pub scrip_master_url: String,
    /// Address the axum server binds to.
    pub bind_addr: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            broker_base_url: env_or("DHAN_BASE_URL", "https://api.dhan.co"),
            scrip_master_url: env_or(
                "SCRIP_MASTER_URL",
                "https://images.dhan.co/api-data/api-scrip-master.csv",
            ),
            bind_addr: env_or("BIND_ADDR", "0.0.0.0:3000"),
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
