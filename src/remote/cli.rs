//! CLI-backed remote store.
//!
//! Shells out to the storage command-line tool. Metadata is read from the
//! tool's JSON describe output instead of fixed text offsets.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;
use tokio::process::Command;
use tracing::{debug, info, warn};

use super::{ObjectMetadata, RemoteStore};
use crate::error::{CacheError, Result};

/// Identifies the describe output shape this client understands.
pub const DESCRIBE_CONTRACT: &str = "gcloud-storage-describe/v1";

/// Status reported when the tool was terminated without an exit code.
const SIGNALLED_STATUS: i32 = -1;

/// Remote store that invokes a storage CLI (`gcloud` by default).
#[derive(Debug, Clone)]
pub struct CliRemote {
    program: String,
}

impl CliRemote {
    pub fn new(program: impl Into<String>) -> Self {
        let program = program.into();
        info!(program = %program, contract = DESCRIBE_CONTRACT, "using CLI remote store");
        Self { program }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Checks that the tool can be launched.
    pub async fn is_available(&self) -> bool {
        Command::new(&self.program)
            .arg("--version")
            .output()
            .await
            .map(|output| output.status.success())
            .unwrap_or(false)
    }

    fn fetch_args(key: &str) -> [&str; 3] {
        ["storage", "cat", key]
    }

    fn describe_args(key: &str) -> [&str; 5] {
        ["storage", "objects", "describe", key, "--format=json"]
    }
}

#[async_trait]
impl RemoteStore for CliRemote {
    fn name(&self) -> &str {
        &self.program
    }

    async fn fetch(&self, key: &str) -> Result<Vec<u8>> {
        debug!(key, "fetching remote object");
        let output = Command::new(&self.program)
            .args(Self::fetch_args(key))
            .kill_on_drop(true)
            .output()
            .await?;

        if !output.status.success() {
            let status = output.status.code().unwrap_or(SIGNALLED_STATUS);
            warn!(
                key,
                status,
                stderr = %String::from_utf8_lossy(&output.stderr).trim(),
                "remote fetch failed"
            );
            return Err(CacheError::RemoteFetch {
                key: key.to_string(),
                status,
            });
        }

        Ok(output.stdout)
    }

    async fn metadata(&self, key: &str) -> Result<ObjectMetadata> {
        debug!(key, "querying remote metadata");
        let output = Command::new(&self.program)
            .args(Self::describe_args(key))
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| CacheError::metadata(key, e.to_string()))?;

        if !output.status.success() {
            let status = output.status.code().unwrap_or(SIGNALLED_STATUS);
            return Err(CacheError::metadata(
                key,
                format!(
                    "describe exited with status {}: {}",
                    status,
                    String::from_utf8_lossy(&output.stderr).trim()
                ),
            ));
        }

        parse_describe(key, &output.stdout)
    }
}

// == Describe Output ==
#[derive(Debug, Deserialize)]
struct DescribeOutput {
    #[serde(alias = "updated")]
    update_time: String,
    #[serde(default)]
    size: Option<Value>,
}

/// Parses the JSON emitted by `storage objects describe`.
///
/// Accepts a single object or a one-element list.
pub(crate) fn parse_describe(key: &str, raw: &[u8]) -> Result<ObjectMetadata> {
    let value: Value = serde_json::from_slice(raw)
        .map_err(|e| CacheError::metadata(key, format!("invalid describe output: {}", e)))?;

    let object = match value {
        Value::Array(mut items) if !items.is_empty() => items.swap_remove(0),
        Value::Array(_) => return Err(CacheError::metadata(key, "describe returned no objects")),
        other => other,
    };

    let described: DescribeOutput = serde_json::from_value(object)
        .map_err(|e| CacheError::metadata(key, format!("unexpected describe shape: {}", e)))?;

    let last_modified = parse_timestamp(&described.update_time).ok_or_else(|| {
        CacheError::metadata(
            key,
            format!("unparseable update time '{}'", described.update_time),
        )
    })?;

    let size = match described.size {
        Some(Value::Number(n)) => n.as_u64(),
        Some(Value::String(s)) => s.parse().ok(),
        _ => None,
    };

    Ok(ObjectMetadata {
        key: key.to_string(),
        last_modified,
        size,
    })
}

/// Parses RFC 3339 timestamps and the `+0000` offset form gcloud prints.
pub(crate) fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    DateTime::parse_from_rfc3339(raw)
        .or_else(|_| DateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f%z"))
        .or_else(|_| DateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f%z"))
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_timestamp_formats() {
        let expected = Utc.with_ymd_and_hms(2024, 3, 5, 12, 30, 0).unwrap();

        assert_eq!(parse_timestamp("2024-03-05T12:30:00Z"), Some(expected));
        assert_eq!(parse_timestamp("2024-03-05T12:30:00+0000"), Some(expected));
        assert_eq!(parse_timestamp("2024-03-05T14:30:00+02:00"), Some(expected));
        assert_eq!(parse_timestamp("2024-03-05 12:30:00+00:00"), Some(expected));
        assert_eq!(parse_timestamp("yesterday"), None);
    }

    #[test]
    fn test_parse_describe_object() {
        let raw = br#"{"name": "a.json", "size": "42", "update_time": "2024-03-05T12:30:00+0000"}"#;

        let meta = parse_describe("gs://b/a.json", raw).unwrap();

        assert_eq!(meta.key, "gs://b/a.json");
        assert_eq!(meta.size, Some(42));
        assert_eq!(
            meta.last_modified,
            Utc.with_ymd_and_hms(2024, 3, 5, 12, 30, 0).unwrap()
        );
    }

    #[test]
    fn test_parse_describe_list_with_updated_alias() {
        let raw = br#"[{"updated": "2024-03-05T12:30:00.250Z", "size": 7}]"#;

        let meta = parse_describe("gs://b/a", raw).unwrap();

        assert_eq!(meta.size, Some(7));
        assert_eq!(meta.last_modified.timestamp_subsec_millis(), 250);
    }

    #[test]
    fn test_parse_describe_rejects_garbage() {
        assert!(matches!(
            parse_describe("k", b"Update time: Tue, 05 Mar 2024"),
            Err(CacheError::RemoteMetadata { .. })
        ));
        assert!(matches!(
            parse_describe("k", b"[]"),
            Err(CacheError::RemoteMetadata { .. })
        ));
        assert!(matches!(
            parse_describe("k", br#"{"update_time": "soon"}"#),
            Err(CacheError::RemoteMetadata { .. })
        ));
        assert!(matches!(
            parse_describe("k", br#"{"size": 1}"#),
            Err(CacheError::RemoteMetadata { .. })
        ));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_fetch_failure_carries_status() {
        let remote = CliRemote::new("false");

        let result = remote.fetch("gs://b/missing").await;

        match result {
            Err(CacheError::RemoteFetch { key, status }) => {
                assert_eq!(key, "gs://b/missing");
                assert_eq!(status, 1);
            }
            other => panic!("expected RemoteFetch, got {:?}", other),
        }
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_fetch_returns_stdout() {
        let remote = CliRemote::new("echo");

        let payload = remote.fetch("gs://b/x").await.unwrap();

        assert_eq!(payload, b"storage cat gs://b/x\n");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_metadata_unparseable_output() {
        let remote = CliRemote::new("echo");

        let result = remote.metadata("gs://b/x").await;

        assert!(matches!(result, Err(CacheError::RemoteMetadata { .. })));
    }

    #[tokio::test]
    async fn test_missing_program() {
        let remote = CliRemote::new("objcache-no-such-tool");

        assert!(!remote.is_available().await);
        assert!(matches!(
            remote.fetch("gs://b/x").await,
            Err(CacheError::Io(_))
        ));
        assert!(matches!(
            remote.metadata("gs://b/x").await,
            Err(CacheError::RemoteMetadata { .. })
        ));
    }
}
