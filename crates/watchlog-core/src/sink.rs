//! Durable write sink collaborator.

use crate::error::CaptureError;
use async_trait::async_trait;
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

/// One durable write handed to the sink.
///
/// Contents are always a complete file; the sink overwrites whatever was at
/// the destination before.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportRequest {
    /// Destination path relative to the sink root, forward-slash separated.
    pub destination: String,
    /// Mime type of the payload.
    pub mime: String,
    /// Full file contents.
    pub contents: String,
}

/// Privileged collaborator performing overwrite-capable file writes.
#[async_trait]
pub trait ExportSink: Send + Sync {
    /// Write the request to durable storage, replacing any previous file.
    /// Callers await completion before considering the export done.
    async fn write(&self, request: &ExportRequest) -> Result<(), CaptureError>;
}

/// Filesystem sink rooted at a directory.
pub struct FsSink {
    root: PathBuf,
}

impl FsSink {
    /// Create a sink writing under the given root directory.
    pub fn new(root: impl AsRef<Path>) -> Result<Self, CaptureError> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root)?;
        info!("initialized filesystem sink (root={})", root.display());
        Ok(Self { root })
    }
}

#[async_trait]
impl ExportSink for FsSink {
    async fn write(&self, request: &ExportRequest) -> Result<(), CaptureError> {
        let path = self.root.join(&request.destination);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let temp_path = path.with_extension("tmp");
        fs::write(&temp_path, &request.contents)?;
        fs::rename(temp_path, path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{ExportRequest, ExportSink, FsSink};
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    fn request(destination: &str, contents: &str) -> ExportRequest {
        ExportRequest {
            destination: destination.to_string(),
            mime: "application/json".to_string(),
            contents: contents.to_string(),
        }
    }

    #[tokio::test]
    async fn write_creates_nested_directories() {
        let temp = tempdir().expect("tempdir");
        let sink = FsSink::new(temp.path()).expect("sink");
        sink.write(&request("a/b/c.json", "{}")).await.expect("write");
        let written = std::fs::read_to_string(temp.path().join("a/b/c.json")).expect("read");
        assert_eq!(written, "{}");
    }

    #[tokio::test]
    async fn write_overwrites_previous_contents() {
        let temp = tempdir().expect("tempdir");
        let sink = FsSink::new(temp.path()).expect("sink");
        sink.write(&request("day.ndjson", "one\n")).await.expect("first");
        sink.write(&request("day.ndjson", "one\ntwo\n"))
            .await
            .expect("second");
        let written = std::fs::read_to_string(temp.path().join("day.ndjson")).expect("read");
        assert_eq!(written, "one\ntwo\n");
    }
}
