//! Configuration Module
//!
//! Handles loading and managing cache configuration from environment variables.

use std::env;

use crate::cache::DEFAULT_MAX_VALUE_SIZE;

/// Cache and server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Maximum number of objects the cache can hold
    pub max_entries: usize,
    /// Largest payload in bytes that will be cached
    pub max_value_size: usize,
    /// Bypass the cache entirely and always fetch from the remote
    pub cache_disabled: bool,
    /// HTTP server port
    pub server_port: u16,
    /// Program invoked for remote fetch and metadata queries
    pub remote_program: String,
    /// URL scheme prepended to object paths (e.g. `gs`)
    pub remote_scheme: String,
    /// Deadline in seconds for a single object request
    pub request_timeout: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `MAX_ENTRIES` - Maximum cached objects (default: 10)
    /// - `MAX_VALUE_SIZE` - Maximum cached payload in bytes (default: 16 MiB)
    /// - `CACHE_DISABLED` - Bypass the cache (default: false)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `REMOTE_PROGRAM` - Storage CLI to invoke (default: gcloud)
    /// - `REMOTE_SCHEME` - Object URL scheme (default: gs)
    /// - `REQUEST_TIMEOUT` - Per-request deadline in seconds (default: 60)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            max_entries: parse_var("MAX_ENTRIES").unwrap_or(defaults.max_entries),
            max_value_size: parse_var("MAX_VALUE_SIZE").unwrap_or(defaults.max_value_size),
            cache_disabled: env::var("CACHE_DISABLED")
                .ok()
                .and_then(|v| parse_flag(&v))
                .unwrap_or(defaults.cache_disabled),
            server_port: parse_var("SERVER_PORT").unwrap_or(defaults.server_port),
            remote_program: env::var("REMOTE_PROGRAM")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(defaults.remote_program),
            remote_scheme: env::var("REMOTE_SCHEME")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(defaults.remote_scheme),
            request_timeout: parse_var("REQUEST_TIMEOUT").unwrap_or(defaults.request_timeout),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_entries: 10,
            max_value_size: DEFAULT_MAX_VALUE_SIZE,
            cache_disabled: false,
            server_port: 3000,
            remote_program: "gcloud".to_string(),
            remote_scheme: "gs".to_string(),
            request_timeout: 60,
        }
    }
}

fn parse_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.trim().parse().ok())
}

/// Parses a boolean flag the way shell users write them.
fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}
