//! Cache Module
//!
//! Provides the bounded in-memory LRU store that sits in front of remote fetches.

mod entry;
mod lru;
mod stats;
mod store;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use entry::CacheEntry;
pub use lru::LruTracker;
pub use stats::CacheStats;
pub use store::CacheStore;

// == Public Constants ==
/// Maximum allowed key length in bytes
pub const MAX_KEY_LENGTH: usize = 1024;

/// Default maximum cached payload size in bytes
pub const DEFAULT_MAX_VALUE_SIZE: usize = 16 * 1024 * 1024; // 16 MiB
