//! # models::account
//!
//! The single linked broker credential. At most one account is active at any
//! time; the registry in [`crate::accounts`] enforces that invariant.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// A linked Dhan account.
///
/// The access token is write-only from the outside world: it is stored and
/// attached to outbound broker calls, but never serialized back to a client.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub client_id: String,
    #[serde(skip_serializing)]
    pub access_token: String,
    pub is_active: bool,
    pub linked_at: DateTime<Utc>,
    /// Bumped on every successful positions fetch.
    pub last_synced_at: DateTime<Utc>,
}

impl Account {
    pub fn new(client_id: impl Into<String>, access_token: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            client_id: client_id.into(),
            access_token: access_token.into(),
            is_active: true,
            linked_at: now,
            last_synced_at: now,
        }
    }
}
