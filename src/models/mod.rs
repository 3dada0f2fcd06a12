//! Request and Response models for the object cache API
//!
//! DTOs used for serializing/deserializing HTTP query strings and bodies.

pub mod requests;
pub mod responses;

pub use requests::{ObjectQuery, ToggleRequest};
pub use responses::{
    HealthResponse, NotFoundResponse, ObjectResponse, StatsResponse, ToggleResponse,
};
