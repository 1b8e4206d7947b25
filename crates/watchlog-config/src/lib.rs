//! Configuration schema and loading for watchlog.

pub mod error;
pub mod loader;
pub mod model;

/// Config error type.
pub use error::ConfigError;
/// File loader.
pub use loader::load_from_path;
/// Configuration schema and builder.
pub use model::{ExportConfig, ExportMode, WatchlogConfig, WatchlogConfigBuilder};
