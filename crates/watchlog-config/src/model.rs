//! Configuration schema for watchlog.

use serde::{Deserialize, Serialize};

/// Root config for the capture pipeline.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct WatchlogConfig {
    #[serde(default, rename = "$schema")]
    pub schema: Option<String>,
    #[serde(default)]
    pub export: ExportConfig,
}

impl WatchlogConfig {
    /// Start building a config programmatically with defaults applied.
    pub fn builder() -> WatchlogConfigBuilder {
        WatchlogConfigBuilder::new()
    }
}

/// Builder for assembling a `WatchlogConfig` in code.
#[derive(Debug, Default, Clone)]
pub struct WatchlogConfigBuilder {
    config: WatchlogConfig,
}

impl WatchlogConfigBuilder {
    /// Create a new builder seeded with default config values.
    pub fn new() -> Self {
        Self {
            config: WatchlogConfig::default(),
        }
    }

    /// Replace the export configuration.
    pub fn export(mut self, export: ExportConfig) -> Self {
        self.config.export = export;
        self
    }

    /// Finalize and return the built `WatchlogConfig`.
    pub fn build(self) -> WatchlogConfig {
        self.config
    }
}

/// Export routing configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct ExportConfig {
    /// Emit a file write for every newly stored record. Off by default.
    #[serde(default)]
    pub auto_export: bool,
    /// Serialization layout for emitted files.
    #[serde(default)]
    pub mode: ExportMode,
}

/// Serialization layout for exported files.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ExportMode {
    /// One pretty-printed file per captured item.
    PerItem,
    /// One line-delimited file per calendar day, rewritten in full on each
    /// capture.
    #[default]
    DailyAggregate,
}
