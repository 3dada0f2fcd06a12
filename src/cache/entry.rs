//! Cache Entry Module
//!
//! Defines a cached object payload together with its recency timestamp.

use chrono::{DateTime, Utc};

// == Cache Entry ==
/// A cached object payload and the time it was last read or written.
///
/// The recency timestamp doubles as the staleness reference: a remote copy
/// modified after `last_accessed` is considered newer than this entry.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The serialized object as fetched from the remote
    pub value: Vec<u8>,
    /// Last read or write of this entry
    pub last_accessed: DateTime<Utc>,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new entry stamped with the current time.
    pub fn new(value: Vec<u8>) -> Self {
        Self {
            value,
            last_accessed: Utc::now(),
        }
    }

    // == Touch ==
    /// Bumps the recency timestamp to now.
    ///
    /// The timestamp never moves backwards, even if the wall clock does.
    pub fn touch(&mut self) {
        let now = Utc::now();
        if now > self.last_accessed {
            self.last_accessed = now;
        }
    }

    /// Returns true if a remote copy modified at `remote_modified` is newer.
    pub fn is_stale(&self, remote_modified: DateTime<Utc>) -> bool {
        remote_modified > self.last_accessed
    }
}
