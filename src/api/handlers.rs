//! API Handlers
//!
//! HTTP request handlers for each object cache endpoint.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::config::Config;
use crate::error::{CacheError, Result};
use crate::fetcher::{Lookup, ObjectCache};
use crate::format::Format;
use crate::models::{
    HealthResponse, NotFoundResponse, ObjectQuery, ObjectResponse, StatsResponse, ToggleRequest,
    ToggleResponse,
};
use crate::remote::RemoteStore;

/// Application state shared across all handlers.
///
/// The object cache is built once at startup and shared by handle.
#[derive(Clone)]
pub struct AppState {
    pub cache: Arc<ObjectCache>,
    /// URL scheme prepended to request paths
    pub scheme: String,
    /// Deadline applied to each object request
    pub request_timeout: Duration,
}

impl AppState {
    /// Creates a new AppState around an existing cache.
    pub fn new(cache: ObjectCache) -> Self {
        let defaults = Config::default();
        Self {
            cache: Arc::new(cache),
            scheme: defaults.remote_scheme,
            request_timeout: Duration::from_secs(defaults.request_timeout),
        }
    }

    /// Creates a new AppState from configuration and a remote store.
    pub fn from_config(config: &Config, remote: Arc<dyn RemoteStore>) -> Self {
        Self {
            cache: Arc::new(ObjectCache::from_config(config, remote)),
            scheme: config.remote_scheme.clone(),
            request_timeout: Duration::from_secs(config.request_timeout.max(1)),
        }
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    fn object_key(&self, path: &str) -> String {
        format!("{}://{}", self.scheme, path.trim_start_matches('/'))
    }
}

/// Handler for GET /objects/*path
///
/// Reads an object through the cache and returns it decoded.
pub async fn get_object_handler(
    State(state): State<AppState>,
    Path(path): Path<String>,
    Query(query): Query<ObjectQuery>,
) -> Result<Response> {
    let key = state.object_key(&path);
    let format = query.format()?.unwrap_or_else(|| Format::from_key(&key));

    let lookup = tokio::time::timeout(
        state.request_timeout,
        state.cache.fetch_decoded(&key, Some(format)),
    )
    .await
    .map_err(|_| CacheError::Timeout(state.request_timeout))??;

    let response = match lookup {
        Lookup::Found { value, origin } => {
            Json(ObjectResponse::new(key, format, origin, value)).into_response()
        }
        Lookup::NotFound { key, status } => {
            (StatusCode::NOT_FOUND, Json(NotFoundResponse::new(key, status))).into_response()
        }
    };

    Ok(response)
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let stats = state.cache.stats().await;
    let capacity = state.cache.capacity().await;

    Json(StatsResponse::new(&stats, capacity, state.cache.is_enabled()))
}

/// Handler for PUT /cache/enabled
///
/// Turns caching on or off at runtime.
pub async fn toggle_cache_handler(
    State(state): State<AppState>,
    Json(req): Json<ToggleRequest>,
) -> Json<ToggleResponse> {
    state.cache.set_enabled(req.enabled);

    Json(ToggleResponse {
        caching_enabled: state.cache.is_enabled(),
    })
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
