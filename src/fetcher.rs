//! Freshness-Checked Fetcher
//!
//! Decides, per key, whether to serve the cached payload or go back to the
//! remote store. A cached entry is served only while the remote copy is not
//! newer than the entry's recency timestamp.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::cache::{CacheStats, CacheStore};
use crate::config::Config;
use crate::error::{CacheError, Result};
use crate::format::Format;
use crate::remote::RemoteStore;

/// Where a returned payload came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Origin {
    Cache,
    Remote,
}

/// Outcome of a lookup.
///
/// A remote fetch that fails with an exit status is not an error: it comes
/// back as `NotFound` so callers can branch on a missing object.
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup<T = Vec<u8>> {
    Found { value: T, origin: Origin },
    NotFound { key: String, status: i32 },
}

impl<T> Lookup<T> {
    pub fn is_found(&self) -> bool {
        matches!(self, Lookup::Found { .. })
    }

    /// Returns the found value, if any.
    pub fn value(self) -> Option<T> {
        match self {
            Lookup::Found { value, .. } => Some(value),
            Lookup::NotFound { .. } => None,
        }
    }

    fn try_map<U>(self, f: impl FnOnce(T) -> Result<U>) -> Result<Lookup<U>> {
        Ok(match self {
            Lookup::Found { value, origin } => Lookup::Found {
                value: f(value)?,
                origin,
            },
            Lookup::NotFound { key, status } => Lookup::NotFound { key, status },
        })
    }
}

// == Object Cache ==
/// LRU store plus remote collaborator, shared by every caller in the process.
pub struct ObjectCache {
    store: RwLock<CacheStore>,
    remote: Arc<dyn RemoteStore>,
    enabled: AtomicBool,
}

impl ObjectCache {
    pub fn new(store: CacheStore, remote: Arc<dyn RemoteStore>) -> Self {
        Self {
            store: RwLock::new(store),
            remote,
            enabled: AtomicBool::new(true),
        }
    }

    /// Builds the cache from configuration.
    pub fn from_config(config: &Config, remote: Arc<dyn RemoteStore>) -> Self {
        let cache = Self::new(
            CacheStore::with_limits(config.max_entries, config.max_value_size),
            remote,
        );
        cache.set_enabled(!config.cache_disabled);
        cache
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Relaxed)
    }

    /// Turns caching on or off. Existing entries are kept, but nothing is
    /// read from or written to the store while caching is disabled.
    pub fn set_enabled(&self, enabled: bool) {
        let previous = self.enabled.swap(enabled, Ordering::Relaxed);
        if previous != enabled {
            info!(enabled, remote = self.remote.name(), "object caching toggled");
        }
    }

    // == Fetch ==
    /// Returns the current payload of `key`.
    ///
    /// - caching disabled: always fetch, never store
    /// - not cached: fetch and store
    /// - cached: query remote metadata; re-fetch only if the remote copy was
    ///   modified strictly after the entry was last accessed
    ///
    /// Metadata failures are returned as `CacheError::RemoteMetadata`; the
    /// cached value is not served in that case.
    pub async fn fetch(&self, key: &str) -> Result<Lookup> {
        if !self.is_enabled() {
            debug!(key, "caching disabled, fetching directly");
            return self.fetch_remote(key, StoreMode::Skip).await;
        }

        let cached = self.store.read().await.exists(key);
        if !cached {
            self.store.write().await.record_miss();
            debug!(key, "cache miss");
            return self.fetch_remote(key, StoreMode::Insert).await;
        }

        let metadata = self.remote.metadata(key).await?;
        let stale = self
            .store
            .read()
            .await
            .is_stale(key, metadata.last_modified);
        match stale {
            Ok(true) => {
                info!(
                    key,
                    remote_modified = %metadata.last_modified,
                    "remote copy is newer, refreshing"
                );
                return self.fetch_remote(key, StoreMode::Refresh).await;
            }
            Ok(false) => {}
            // Evicted by another caller while metadata was in flight
            Err(CacheError::NotFound(_)) => {
                return self.fetch_remote(key, StoreMode::Insert).await;
            }
            Err(err) => return Err(err),
        }

        let cached = self.store.write().await.get(key);
        match cached {
            Ok(value) => {
                debug!(key, "serving cached object");
                Ok(Lookup::Found {
                    value,
                    origin: Origin::Cache,
                })
            }
            Err(CacheError::NotFound(_)) => self.fetch_remote(key, StoreMode::Insert).await,
            Err(err) => Err(err),
        }
    }

    /// Fetches `key` and decodes it with `format`, inferred from the key when `None`.
    pub async fn fetch_decoded(&self, key: &str, format: Option<Format>) -> Result<Lookup<Value>> {
        let format = format.unwrap_or_else(|| Format::from_key(key));
        self.fetch(key)
            .await?
            .try_map(|bytes| format.decode(key, &bytes))
    }

    /// Returns true if `key` is currently cached.
    pub async fn contains(&self, key: &str) -> bool {
        self.store.read().await.exists(key)
    }

    /// Returns the recency timestamp of a cached `key`.
    pub async fn last_accessed(&self, key: &str) -> Result<DateTime<Utc>> {
        self.store.read().await.last_accessed(key)
    }

    pub async fn len(&self) -> usize {
        self.store.read().await.len()
    }

    pub async fn stats(&self) -> CacheStats {
        self.store.read().await.stats()
    }

    pub async fn capacity(&self) -> usize {
        self.store.read().await.capacity()
    }

    async fn fetch_remote(&self, key: &str, mode: StoreMode) -> Result<Lookup> {
        let value = match self.remote.fetch(key).await {
            Ok(value) => value,
            Err(CacheError::RemoteFetch { key, status }) => {
                return Ok(Lookup::NotFound { key, status });
            }
            Err(err) => return Err(err),
        };

        if mode != StoreMode::Skip {
            let mut store = self.store.write().await;
            match store.set(key, value.clone()) {
                Ok(()) if mode == StoreMode::Refresh => store.record_refresh(),
                Ok(()) => {}
                Err(err) => warn!(key, error = %err, "serving object without caching it"),
            }
        }

        Ok(Lookup::Found {
            value,
            origin: Origin::Remote,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StoreMode {
    Skip,
    Insert,
    Refresh,
}
