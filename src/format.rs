//! Serialization Formats
//!
//! The fixed set of payload formats the cache can decode, resolved through a
//! static lookup table by tag or file extension.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use serde_json::Value;

use crate::error::{CacheError, Result};

/// Supported payload formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    Json,
    Toml,
    Text,
}

struct FormatInfo {
    format: Format,
    tag: &'static str,
    extensions: &'static [&'static str],
}

const FORMATS: &[FormatInfo] = &[
    FormatInfo {
        format: Format::Json,
        tag: "json",
        extensions: &["json"],
    },
    FormatInfo {
        format: Format::Toml,
        tag: "toml",
        extensions: &["toml"],
    },
    FormatInfo {
        format: Format::Text,
        tag: "text",
        extensions: &["txt", "text"],
    },
];

impl Format {
    pub const ALL: [Format; 3] = [Format::Json, Format::Toml, Format::Text];

    fn info(self) -> &'static FormatInfo {
        // Every variant has a row in FORMATS
        FORMATS
            .iter()
            .find(|info| info.format == self)
            .unwrap_or(&FORMATS[2])
    }

    /// The tag used in requests and responses.
    pub fn tag(self) -> &'static str {
        self.info().tag
    }

    /// Infers the format from the key's file extension, defaulting to text.
    pub fn from_key(key: &str) -> Format {
        let file = key.rsplit('/').next().unwrap_or(key);
        let ext = match file.rsplit_once('.') {
            Some((_, ext)) => ext.to_ascii_lowercase(),
            None => return Format::Text,
        };
        FORMATS
            .iter()
            .find(|info| info.extensions.contains(&ext.as_str()))
            .map(|info| info.format)
            .unwrap_or(Format::Text)
    }

    /// Decodes a payload into a JSON value.
    pub fn decode(self, key: &str, bytes: &[u8]) -> Result<Value> {
        let fail = |reason: String| CacheError::Decode {
            key: key.to_string(),
            format: self.tag().to_string(),
            reason,
        };

        match self {
            Format::Json => serde_json::from_slice(bytes).map_err(|e| fail(e.to_string())),
            Format::Toml => {
                let text = std::str::from_utf8(bytes).map_err(|e| fail(e.to_string()))?;
                let table: toml::Table = toml::from_str(text).map_err(|e| fail(e.to_string()))?;
                serde_json::to_value(table).map_err(|e| fail(e.to_string()))
            }
            Format::Text => String::from_utf8(bytes.to_vec())
                .map(Value::String)
                .map_err(|e| fail(e.to_string())),
        }
    }
}

impl FromStr for Format {
    type Err = CacheError;

    fn from_str(s: &str) -> Result<Self> {
        let tag = s.trim().to_ascii_lowercase();
        FORMATS
            .iter()
            .find(|info| info.tag == tag)
            .map(|info| info.format)
            .ok_or_else(|| {
                let known: Vec<&str> = FORMATS.iter().map(|info| info.tag).collect();
                CacheError::InvalidRequest(format!(
                    "Unknown format '{}', expected one of: {}",
                    s,
                    known.join(", ")
                ))
            })
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}
