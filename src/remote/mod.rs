//! Remote Module
//!
//! The storage collaborator the cache fetches from, and its CLI-backed client.

mod cli;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::Result;

pub use cli::{CliRemote, DESCRIBE_CONTRACT};

/// Structured metadata for a remote object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ObjectMetadata {
    pub key: String,
    /// Last modification time on the remote side
    pub last_modified: DateTime<Utc>,
    /// Payload size in bytes, when the remote reports it
    pub size: Option<u64>,
}

/// Access to objects in remote storage.
///
/// Implementations report a failed fetch as `CacheError::RemoteFetch` with
/// the exit status, and a failed or unparseable metadata query as
/// `CacheError::RemoteMetadata`. Calls block until the remote answers; any
/// deadline is the caller's to impose.
#[async_trait]
pub trait RemoteStore: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &str;

    /// Downloads the current payload of `key`.
    async fn fetch(&self, key: &str) -> Result<Vec<u8>>;

    /// Queries the last-modified time of `key` without downloading it.
    async fn metadata(&self, key: &str) -> Result<ObjectMetadata>;
}
