//! Page configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use vitrine_cache::{Clock, KvStore, SnapshotStore};
use vitrine_data::{ViaCepClient, VIACEP_BASE_URL};

use crate::data::PersistedSelection;

/// Default storage key for the page snapshot.
pub const DEFAULT_STORAGE_KEY: &str = "productPageData";

/// Default snapshot lifetime in minutes.
pub const DEFAULT_TTL_MINUTES: u64 = 15;

/// Which lookup completion gets the final say when lookups overlap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResponseOrdering {
    /// Every completion is applied in arrival order, so a slow earlier
    /// request can overwrite a newer one.
    #[default]
    LastResponseWins,
    /// Only the most recently issued request may update the page; stale
    /// completions are dropped.
    LastRequestWins,
}

/// Tunables for a mounted page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageOptions {
    /// Key the snapshot is stored under.
    pub storage_key: String,
    /// Snapshot lifetime in minutes.
    pub ttl_minutes: u64,
    /// Overlapping lookup policy.
    pub ordering: ResponseOrdering,
    /// Base URL of the CEP lookup service.
    pub lookup_base_url: String,
}

impl Default for PageOptions {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            ttl_minutes: DEFAULT_TTL_MINUTES,
            ordering: ResponseOrdering::default(),
            lookup_base_url: VIACEP_BASE_URL.to_string(),
        }
    }
}

impl PageOptions {
    /// Snapshot lifetime.
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_minutes.saturating_mul(60))
    }

    /// Snapshot store over `store` using the configured key and lifetime.
    pub fn snapshot_store<S, C>(&self, store: S, clock: C) -> SnapshotStore<PersistedSelection, S, C>
    where
        S: KvStore,
        C: Clock,
    {
        SnapshotStore::with_clock(store, clock, self.storage_key.clone()).with_ttl(self.ttl())
    }

    /// ViaCEP client pointed at the configured base URL.
    pub fn lookup_client(&self) -> ViaCepClient {
        ViaCepClient::new().with_base_url(self.lookup_base_url.clone())
    }
}
