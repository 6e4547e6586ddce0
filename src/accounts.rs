//! # accounts — Account Link Registry
//!
//! Holds the linked broker credentials and enforces the single-active-account
//! invariant. All mutation goes through one `RwLock`, so there is exactly one
//! in-flight writer at a time and readers observe either the old record or
//! the new one, never a partial write.

use std::collections::HashMap;

use chrono::Utc;
use tokio::sync::RwLock;
use tracing::info;

use crate::models::Account;

#[derive(Default)]
struct RegistryInner {
    /// All accounts ever linked, keyed by client id.
    accounts: HashMap<String, Account>,
    /// Client id of the single active account, if any.
    active: Option<String>,
}

#[derive(Default)]
pub struct AccountRegistry {
    inner: RwLock<RegistryInner>,
}

impl AccountRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Link (or relink) an account.
    ///
    /// Relinking an existing client id updates its token and timestamps in
    /// place — no duplicate record is created. The linked account always ends
    /// up active; any previously active account is deactivated, so the
    /// one-active invariant can never be violated by interleaved links.
    pub async fn link(&self, client_id: &str, access_token: &str) -> Account {
        let mut inner = self.inner.write().await;

        if let Some(prev) = inner.active.take() {
            if prev != client_id {
                if let Some(old) = inner.accounts.get_mut(&prev) {
                    old.is_active = false;
                }
            }
        }

        let now = Utc::now();
        let account = inner
            .accounts
            .entry(client_id.to_string())
            .and_modify(|a| {
                a.access_token = access_token.to_string();
                a.is_active = true;
                a.linked_at = now;
                a.last_synced_at = now;
            })
            .or_insert_with(|| Account::new(client_id, access_token))
            .clone();

        inner.active = Some(client_id.to_string());

        info!(client_id, "Dhan account linked");
        account
    }

    /// The single account flagged active, if any.
    pub async fn active(&self) -> Option<Account> {
        let inner = self.inner.read().await;
        inner
            .active
            .as_deref()
            .and_then(|id| inner.accounts.get(id))
            .cloned()
    }

    /// Bump `last_synced_at` after a successful positions fetch.
    pub async fn mark_synced(&self, client_id: &str) {
        let mut inner = self.inner.write().await;
        if let Some(account) = inner.accounts.get_mut(client_id) {
            account.last_synced_at = Utc::now();
        }
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn link_creates_active_account() {
        let registry = AccountRegistry::new();
        let account = registry.link("1000000001", "token-a").await;

        assert!(account.is_active);
        assert_eq!(account.client_id, "1000000001");
        assert_eq!(registry.active().await.unwrap().client_id, "1000000001");
    }

    #[tokio::test]
    async fn relink_updates_in_place_without_duplicates() {
        let registry = AccountRegistry::new();
        registry.link("1000000001", "token-a").await;
        let relinked = registry.link("1000000001", "token-b").await;

        assert_eq!(relinked.access_token, "token-b");
        let inner = registry.inner.read().await;
        assert_eq!(inner.accounts.len(), 1);
        assert!(inner.accounts["1000000001"].is_active);
    }

    #[tokio::test]
    async fn linking_second_client_deactivates_first() {
        let registry = AccountRegistry::new();
        registry.link("1000000001", "token-a").await;
        registry.link("2000000002", "token-b").await;

        let active = registry.active().await.unwrap();
        assert_eq!(active.client_id, "2000000002");

        let inner = registry.inner.read().await;
        let actives = inner.accounts.values().filter(|a| a.is_active).count();
        assert_eq!(actives, 1);
    }

    #[tokio::test]
    async fn mark_synced_bumps_timestamp() {
        let registry = AccountRegistry::new();
        let linked = registry.link("1000000001", "token-a").await;

        registry.mark_synced("1000000001").await;
        let after = registry.active().await.unwrap();
        assert!(after.last_synced_at >= linked.last_synced_at);
    }

    #[tokio::test]
    async fn no_account_means_no_active() {
        let registry = AccountRegistry::new();
        assert!(registry.active().await.is_none());
    }
}
