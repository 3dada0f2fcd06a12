//! Shared test helpers: an in-memory remote store that counts its calls.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use objcache::{CacheError, ObjectMetadata, RemoteStore, Result};

struct RemoteObject {
    payload: Vec<u8>,
    modified: DateTime<Utc>,
}

/// Remote store backed by a map, with call counters for fetch and metadata.
///
/// Unknown keys fail to fetch with status 1.
#[derive(Default)]
pub struct ScriptedRemote {
    objects: Mutex<HashMap<String, RemoteObject>>,
    fetches: AtomicUsize,
    metadata_calls: AtomicUsize,
    metadata_broken: AtomicBool,
}

impl ScriptedRemote {
    pub fn new() -> Self {
        Self::default()
    }

    /// Publishes `payload` under `key` with the given modification time.
    pub fn put(&self, key: &str, payload: &[u8], modified: DateTime<Utc>) {
        self.objects.lock().unwrap().insert(
            key.to_string(),
            RemoteObject {
                payload: payload.to_vec(),
                modified,
            },
        );
    }

    /// Publishes `payload` with a modification time an hour in the past.
    pub fn put_old(&self, key: &str, payload: &[u8]) {
        self.put(key, payload, Utc::now() - Duration::hours(1));
    }

    pub fn break_metadata(&self) {
        self.metadata_broken.store(true, Ordering::SeqCst);
    }

    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    pub fn metadata_count(&self) -> usize {
        self.metadata_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RemoteStore for ScriptedRemote {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn fetch(&self, key: &str) -> Result<Vec<u8>> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        self.objects
            .lock()
            .unwrap()
            .get(key)
            .map(|obj| obj.payload.clone())
            .ok_or_else(|| CacheError::RemoteFetch {
                key: key.to_string(),
                status: 1,
            })
    }

    async fn metadata(&self, key: &str) -> Result<ObjectMetadata> {
        self.metadata_calls.fetch_add(1, Ordering::SeqCst);
        if self.metadata_broken.load(Ordering::SeqCst) {
            return Err(CacheError::metadata(key, "unparseable describe output"));
        }
        self.objects
            .lock()
            .unwrap()
            .get(key)
            .map(|obj| ObjectMetadata {
                key: key.to_string(),
                last_modified: obj.modified,
                size: Some(obj.payload.len() as u64),
            })
            .ok_or_else(|| CacheError::metadata(key, "no such object"))
    }
}
