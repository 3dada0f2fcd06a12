//! Request DTOs for the object cache API
//!
//! Defines query strings and bodies accepted by the HTTP surface.

use serde::Deserialize;

use crate::error::Result;
use crate::format::Format;

/// Query string for `GET /objects/*path`
///
/// # Fields
/// - `format`: Optional format tag; inferred from the path extension if absent
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ObjectQuery {
    #[serde(default)]
    pub format: Option<String>,
}

impl ObjectQuery {
    /// Resolves the requested format tag, if one was given.
    pub fn format(&self) -> Result<Option<Format>> {
        self.format
            .as_deref()
            .filter(|tag| !tag.trim().is_empty())
            .map(|tag| tag.parse::<Format>())
            .transpose()
    }
}

/// Request body for `PUT /cache/enabled`
#[derive(Debug, Clone, Deserialize)]
pub struct ToggleRequest {
    pub enabled: bool,
}
