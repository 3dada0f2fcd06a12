//! Error types for the object cache
//!
//! Provides unified error handling using thiserror.

use std::time::Duration;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the object cache.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Key not present in the LRU store
    #[error("Key not found: {0}")]
    NotFound(String),

    /// Value could not be stored (key or size constraints)
    #[error("Cannot cache '{key}': {reason}")]
    CacheStore { key: String, reason: String },

    /// Remote fetch exited with a non-zero status
    #[error("Remote fetch failed for '{key}' with status {status}")]
    RemoteFetch { key: String, status: i32 },

    /// Remote metadata query failed or returned unparseable output
    #[error("Remote metadata unavailable for '{key}': {reason}")]
    RemoteMetadata { key: String, reason: String },

    /// Payload could not be decoded in the requested format
    #[error("Cannot decode '{key}' as {format}: {reason}")]
    Decode {
        key: String,
        format: String,
        reason: String,
    },

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Caller-imposed deadline elapsed
    #[error("Timed out after {}ms", .0.as_millis())]
    Timeout(Duration),

    /// Spawning the remote tool failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CacheError {
    /// Builds a `CacheStore` error.
    pub fn store(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::CacheStore {
            key: key.into(),
            reason: reason.into(),
        }
    }

    /// Builds a `RemoteMetadata` error.
    pub fn metadata(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::RemoteMetadata {
            key: key.into(),
            reason: reason.into(),
        }
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for CacheError {
    fn into_response(self) -> Response {
        let status = match &self {
            CacheError::NotFound(_) | CacheError::RemoteFetch { .. } => StatusCode::NOT_FOUND,
            CacheError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            CacheError::Decode { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            CacheError::RemoteMetadata { .. } => StatusCode::BAD_GATEWAY,
            CacheError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
            CacheError::CacheStore { .. } | CacheError::Io(_) | CacheError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = match &self {
            CacheError::RemoteFetch { key, status } => Json(json!({
                "error": self.to_string(),
                "key": key,
                "status": status,
            })),
            _ => Json(json!({
                "error": self.to_string()
            })),
        };

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the object cache.
pub type Result<T> = std::result::Result<T, CacheError>;
