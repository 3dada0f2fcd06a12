//! API Module
//!
//! HTTP handlers and routing for the object cache.
//!
//! # Endpoints
//! - `GET /objects/*path` - Read an object through the cache
//! - `GET /stats` - Cache statistics
//! - `PUT /cache/enabled` - Turn caching on or off
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
