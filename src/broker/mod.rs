//! # broker — Dhan HTTP Gateway
//!
//! Thin, classified wrapper over the Dhan REST API. One attempt per call, no
//! retry; the outcome is one of three things the caller can match on
//! directly:
//!
//! - 2xx → parsed JSON body
//! - 4xx/5xx → [`AppError::BrokerRejected`] carrying the raw body text, so
//!   the broker's own diagnostics survive to the front-end
//! - network failure → [`AppError::Transport`]

pub mod json;
pub mod orders;
pub mod positions;

use reqwest::Method;
use serde_json::Value;
use tracing::{debug, error, info};

use crate::broker::orders::OrderPayload;
use crate::error::AppError;

pub struct BrokerClient {
    http: reqwest::Client,
    base_url: String,
}

impl BrokerClient {
    pub fn new(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
        }
    }

    /// `GET /v2/positions` — raw position records, unnormalized.
    pub async fn positions(&self, access_token: &str) -> Result<Vec<Value>, AppError> {
        let body = self
            .call(Method::GET, "/v2/positions", None, access_token)
            .await?;

        match body {
            Value::Array(records) => Ok(records),
            // An empty book sometimes comes back as null.
            Value::Null => Ok(Vec::new()),
            other => Err(AppError::Internal(anyhow::anyhow!(
                "unexpected positions payload shape: {other}"
            ))),
        }
    }

    /// `POST /v2/orders` — place an order, return the raw ack.
    pub async fn place_order(
        &self,
        payload: &OrderPayload,
        access_token: &str,
    ) -> Result<Value, AppError> {
        info!(
            security_id = %payload.security_id,
            transaction = ?payload.transaction_type,
            quantity = payload.quantity,
            "Sending order to Dhan"
        );
        let body = serde_json::to_value(payload).map_err(anyhow::Error::from)?;
        self.call(Method::POST, "/v2/orders", Some(body), access_token)
            .await
    }

    /// `DELETE /v2/orders/{orderId}` — cancel a pending order, return the
    /// raw ack.
    pub async fn cancel_order(
        &self,
        order_id: &str,
        access_token: &str,
    ) -> Result<Value, AppError> {
        self.call(
            Method::DELETE,
            &format!("/v2/orders/{order_id}"),
            None,
            access_token,
        )
        .await
    }

    /// One authenticated round trip to the broker.
    async fn call(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
        access_token: &str,
    ) -> Result<Value, AppError> {
        let url = format!("{}{path}", self.base_url);
        debug!(%method, %url, "Dhan API call");

        let mut request = self
            .http
            .request(method, &url)
            .header("access-token", access_token)
            .header("Content-Type", "application/json");

        if let Some(body) = &body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|e| {
            error!(error = %e, %url, "Dhan unreachable");
            AppError::Transport(e.to_string())
        })?;

        let status = response.status();
        if status.is_client_error() || status.is_server_error() {
            let body = response.text().await.unwrap_or_default();
            error!(http_status = %status, body = %body, "Dhan returned HTTP error");
            return Err(AppError::BrokerRejected {
                status: status.as_u16(),
                body,
            });
        }

        let text = response
            .text()
            .await
            .map_err(|e| AppError::Transport(e.to_string()))?;
        if text.trim().is_empty() {
            return Ok(Value::Null);
        }

        serde_json::from_str(&text)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Dhan response parse error: {e}")))
    }
}
