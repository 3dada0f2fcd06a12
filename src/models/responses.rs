//! Response DTOs for the object cache API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;
use serde_json::Value;

use crate::cache::CacheStats;
use crate::fetcher::Origin;
use crate::format::Format;

/// Response body for `GET /objects/*path`
#[derive(Debug, Clone, Serialize)]
pub struct ObjectResponse {
    /// Remote key that was read
    pub key: String,
    /// Format the payload was decoded with
    pub format: Format,
    /// Whether the payload came from the cache or the remote
    pub origin: Origin,
    /// The decoded object
    pub value: Value,
}

impl ObjectResponse {
    pub fn new(key: impl Into<String>, format: Format, origin: Origin, value: Value) -> Self {
        Self {
            key: key.into(),
            format,
            origin,
            value,
        }
    }
}

/// Response body when the remote reports the object as missing
#[derive(Debug, Clone, Serialize)]
pub struct NotFoundResponse {
    pub error: String,
    pub key: String,
    /// Exit status reported by the remote tool
    pub status: i32,
}

impl NotFoundResponse {
    pub fn new(key: impl Into<String>, status: i32) -> Self {
        let key = key.into();
        Self {
            error: format!("Object '{}' not found (status {})", key, status),
            key,
            status,
        }
    }
}

/// Response body for `GET /stats`
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
    /// Entries replaced because the remote copy was newer
    pub refreshes: u64,
    /// Fetched objects that could not be cached
    pub store_failures: u64,
    pub total_entries: usize,
    pub capacity: usize,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
    pub caching_enabled: bool,
}

impl StatsResponse {
    pub fn new(stats: &CacheStats, capacity: usize, caching_enabled: bool) -> Self {
        Self {
            hits: stats.hits,
            misses: stats.misses,
            evictions: stats.evictions,
            refreshes: stats.refreshes,
            store_failures: stats.store_failures,
            total_entries: stats.total_entries,
            capacity,
            hit_rate: stats.hit_rate(),
            caching_enabled,
        }
    }
}

/// Response body for `PUT /cache/enabled`
#[derive(Debug, Clone, Serialize)]
pub struct ToggleResponse {
    pub caching_enabled: bool,
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}
