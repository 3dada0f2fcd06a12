//! objcache - Freshness-checked LRU cache for remote object storage
//!
//! Serves objects from a bounded in-process cache, re-fetching from the
//! remote store only when the remote copy is newer than the cached entry.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod fetcher;
pub mod format;
pub mod models;
pub mod remote;

pub use api::AppState;
pub use config::Config;
pub use error::{CacheError, Result};
pub use fetcher::{Lookup, ObjectCache, Origin};
pub use format::Format;
pub use remote::{CliRemote, ObjectMetadata, RemoteStore};
