//! # Dhanbridge — Trading Backend Bridge
//!
//! ```text
//!  ┌─────────────┐  /api/broker/*              ┌────────────────────────────┐
//!  │  Front-end  │ ──────────────────────────▶ │ AppState                   │
//!  └─────────────┘                             │ ├─ accounts  (registry)    │
//!                                              │ ├─ broker    (gateway)     │
//!  ┌─────────────┐  GET /v2/positions          │ └─ instruments (index)     │
//!  │  Dhan API   │ ◀────────────────────────── └────────────────────────────┘
//!  └─────────────┘  POST/DELETE /v2/orders
//! ```
//!
//! One linked account, live stateless position/order forwarding, ranked
//! symbol search over the scrip master.

use std::net::SocketAddr;

use axum::{
    routing::{delete, get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod accounts;
mod auth;
mod broker;
mod config;
mod error;
mod instruments;
mod models;
mod routes;
mod state;

use auth::require_api_key;
use config::AppConfig;
use routes::{
    account::{get_active_account, link_account},
    health_check,
    orders::{close_order, create_order},
    positions::{close_position, get_positions},
    symbols::{get_symbol, search_symbols},
};
use state::build_state;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // ── 1. Load .env ──────────────────────────────────────────────────────────
    dotenvy::dotenv().ok();

    // ── 2. Structured logging ─────────────────────────────────────────────────
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::from_default_env()
                .add_directive("dhanbridge=debug".parse()?)
                .add_directive("tower_http=info".parse()?),
        )
        .init();

    // ── 3. Shared state ───────────────────────────────────────────────────────
    let config = AppConfig::from_env();
    let bind_addr = config.bind_addr.clone();
    let state = build_state(config);

    // ── 4. Scrip master load ──────────────────────────────────────────────────
    // One-shot background load; a failure is logged, not fatal — search just
    // serves an empty snapshot until a later restart fills it.
    {
        let state = state.clone();
        tokio::spawn(async move {
            let url = state.config.scrip_master_url.clone();
            if let Err(e) = state.instruments.refresh(&state.http_client, &url).await {
                error!(error = %e, "Scrip master load failed; symbol search will be empty");
            }
        });
    }

    // ── 5. CORS ───────────────────────────────────────────────────────────────
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // ── 6. Router ─────────────────────────────────────────────────────────────
    let app = Router::new()
        // ── Account ───────────────────────────────────────────────────────────
        .route("/api/broker/link-account",    post(link_account))
        .route("/api/broker/account",         get(get_active_account))
        // ── Positions ─────────────────────────────────────────────────────────
        .route("/api/broker/positions",       get(get_positions))
        .route("/api/broker/positions/close", post(close_position))
        // ── Orders ────────────────────────────────────────────────────────────
        .route("/api/broker/orders",          post(create_order))
        .route("/api/broker/orders/:order_id", delete(close_order))
        // ── Symbols ───────────────────────────────────────────────────────────
        .route("/api/broker/symbols/search",  post(search_symbols))
        .route("/api/broker/symbols/:security_id", get(get_symbol))
        // ── Health ────────────────────────────────────────────────────────────
        .route("/health",                     get(health_check))
        // ── Middleware ────────────────────────────────────────────────────────
        .layer(axum::middleware::from_fn(require_api_key))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state);

    // ── 7. Bind & Serve ───────────────────────────────────────────────────────
    let addr: SocketAddr = bind_addr.parse()?;

    info!(?addr, "Dhanbridge server starting");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
