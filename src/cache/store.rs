//! Cache Store Module
//!
//! Bounded HashMap storage with LRU eviction and per-entry recency timestamps.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::cache::{CacheEntry, CacheStats, LruTracker, DEFAULT_MAX_VALUE_SIZE, MAX_KEY_LENGTH};
use crate::error::{CacheError, Result};

// == Cache Store ==
/// Bounded object store with LRU eviction.
///
/// `len() <= capacity()` holds after every operation.
#[derive(Debug)]
pub struct CacheStore {
    /// Object payloads keyed by remote path
    entries: HashMap<String, CacheEntry>,
    /// Recency order used for eviction
    lru: LruTracker,
    stats: CacheStats,
    /// Maximum number of entries allowed
    capacity: usize,
    /// Largest payload accepted by `set`
    max_value_size: usize,
}

impl CacheStore {
    // == Constructor ==
    /// Creates a store holding at most `capacity` objects.
    ///
    /// A capacity of zero is treated as one.
    pub fn new(capacity: usize) -> Self {
        Self::with_limits(capacity, DEFAULT_MAX_VALUE_SIZE)
    }

    /// Creates a store with an explicit payload size limit.
    pub fn with_limits(capacity: usize, max_value_size: usize) -> Self {
        Self {
            entries: HashMap::new(),
            lru: LruTracker::new(),
            stats: CacheStats::new(),
            capacity: capacity.max(1),
            max_value_size,
        }
    }

    // == Exists ==
    /// Returns true if `key` is cached. Does not affect recency or stats.
    pub fn exists(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    // == Get ==
    /// Returns the cached payload for `key` and marks it most recently used.
    pub fn get(&mut self, key: &str) -> Result<Vec<u8>> {
        match self.entries.get_mut(key) {
            Some(entry) => {
                entry.touch();
                self.lru.touch(key);
                self.stats.record_hit();
                Ok(entry.value.clone())
            }
            None => {
                self.stats.record_miss();
                Err(CacheError::NotFound(key.to_string()))
            }
        }
    }

    // == Set ==
    /// Inserts or replaces the payload for `key`, stamped with the current time.
    ///
    /// Inserting a new key into a full store evicts the least recently used
    /// entry first. Fails with `CacheError::CacheStore` when the key or value
    /// cannot be stored; the store is left untouched in that case.
    pub fn set(&mut self, key: &str, value: Vec<u8>) -> Result<()> {
        if let Err(err) = self.validate(key, &value) {
            self.stats.record_store_failure();
            return Err(err);
        }

        if !self.entries.contains_key(key) && self.entries.len() >= self.capacity {
            self.evict_least_recent()?;
        }

        self.entries.insert(key.to_string(), CacheEntry::new(value));
        self.lru.touch(key);
        self.stats.set_total_entries(self.entries.len());

        Ok(())
    }

    // == Last Accessed ==
    /// Returns the recency timestamp recorded for `key`.
    pub fn last_accessed(&self, key: &str) -> Result<DateTime<Utc>> {
        self.entries
            .get(key)
            .map(|entry| entry.last_accessed)
            .ok_or_else(|| CacheError::NotFound(key.to_string()))
    }

    // == Is Stale ==
    /// Returns true if a remote copy modified at `remote_modified` is newer
    /// than the cached entry for `key`.
    pub fn is_stale(&self, key: &str, remote_modified: DateTime<Utc>) -> Result<bool> {
        self.entries
            .get(key)
            .map(|entry| entry.is_stale(remote_modified))
            .ok_or_else(|| CacheError::NotFound(key.to_string()))
    }

    /// Counts a lookup that had to go to the remote because `key` was absent.
    pub fn record_miss(&mut self) {
        self.stats.record_miss();
    }

    /// Counts a replacement triggered by a newer remote copy.
    pub fn record_refresh(&mut self) {
        self.stats.record_refresh();
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    /// Returns the current number of entries in the cache.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    fn validate(&self, key: &str, value: &[u8]) -> Result<()> {
        if key.is_empty() {
            return Err(CacheError::store(key, "key is empty"));
        }
        if key.len() > MAX_KEY_LENGTH {
            return Err(CacheError::store(
                key,
                format!("key exceeds maximum length of {} bytes", MAX_KEY_LENGTH),
            ));
        }
        if value.len() > self.max_value_size {
            return Err(CacheError::store(
                key,
                format!(
                    "value of {} bytes exceeds maximum size of {} bytes",
                    value.len(),
                    self.max_value_size
                ),
            ));
        }
        Ok(())
    }

    fn evict_least_recent(&mut self) -> Result<()> {
        let evicted = self.lru.pop_least_recent().ok_or_else(|| {
            CacheError::Internal("store is full but recency order is empty".to_string())
        })?;
        self.entries.remove(&evicted);
        self.stats.record_eviction();
        debug!(key = %evicted, "evicted least recently used object");
        Ok(())
    }
}
