//! API Routes
//!
//! Configures the Axum router with all object cache endpoints.

use axum::{
    routing::{get, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    get_object_handler, health_handler, stats_handler, toggle_cache_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /objects/*path` - Read an object through the cache
/// - `GET /stats` - Cache statistics
/// - `PUT /cache/enabled` - Turn caching on or off
/// - `GET /health` - Health check endpoint
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/objects/*path", get(get_object_handler))
        .route("/stats", get(stats_handler))
        .route("/cache/enabled", put(toggle_cache_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
