//! Error types for the capture pipeline crate.

use thiserror::Error;

/// Errors returned by capture, store, and export operations.
#[derive(Debug, Error)]
pub enum CaptureError {
    /// Storage backend get/set failed.
    #[error("storage error: {0}")]
    Storage(String),
    /// Export sink write failed.
    #[error("sink error: {0}")]
    Sink(String),
    /// Serialization error.
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
