//! Export routing for newly stored records.

use crate::error::CaptureError;
use crate::model::MetadataRecord;
use crate::sink::{ExportRequest, ExportSink};
use crate::storage::StorageBackend;
use chrono::NaiveDate;
use log::{debug, info};
use serde_json::{Value, json};
use std::sync::Arc;
use watchlog_config::{ExportConfig, ExportMode};

/// Directory prefix for every exported file.
const EXPORT_ROOT: &str = "WatchLogs";
/// Storage key prefix for the per-day aggregate cache.
const CACHE_KEY_PREFIX: &str = "export_cache:";

const JSON_MIME: &str = "application/json";
const NDJSON_MIME: &str = "application/x-ndjson";

/// Routes newly inserted records to the sink per the export configuration.
///
/// Destination paths are deterministic functions of the capture date (and,
/// in per-item mode, the item id), so re-exports land on the same file.
pub struct ExportRouter {
    sink: Arc<dyn ExportSink>,
    storage: Arc<dyn StorageBackend>,
    config: ExportConfig,
}

impl ExportRouter {
    /// Create a router over the given sink and cache storage.
    pub fn new(
        sink: Arc<dyn ExportSink>,
        storage: Arc<dyn StorageBackend>,
        config: ExportConfig,
    ) -> Self {
        Self {
            sink,
            storage,
            config,
        }
    }

    /// Serialize and write the record if auto-export is on.
    ///
    /// Returns the request handed to the sink, or `None` when auto-export is
    /// disabled. A sink failure propagates; the already-stored record is not
    /// rolled back.
    pub async fn handle(
        &self,
        record: &MetadataRecord,
    ) -> Result<Option<ExportRequest>, CaptureError> {
        if !self.config.auto_export {
            debug!("auto-export disabled, skipping (item_id={})", record.item_id);
            return Ok(None);
        }
        let day = record.captured_at.date_naive();
        let request = match self.config.mode {
            ExportMode::PerItem => self.per_item_request(record, day)?,
            ExportMode::DailyAggregate => self.daily_aggregate_request(record, day).await?,
        };
        self.sink.write(&request).await?;
        info!(
            "export written (destination={}, bytes={})",
            request.destination,
            request.contents.len()
        );
        Ok(Some(request))
    }

    /// One pretty-printed file per record; a fresh complete file each call.
    fn per_item_request(
        &self,
        record: &MetadataRecord,
        day: NaiveDate,
    ) -> Result<ExportRequest, CaptureError> {
        Ok(ExportRequest {
            destination: format!("{EXPORT_ROOT}/json/{day}/{}.json", record.item_id),
            mime: JSON_MIME.to_string(),
            contents: serde_json::to_string_pretty(record)?,
        })
    }

    /// Append a compact line to the day's persisted cache and emit the whole
    /// accumulated cache as a full overwrite. The cache is rebuilt by
    /// append only, never re-read from the sink.
    async fn daily_aggregate_request(
        &self,
        record: &MetadataRecord,
        day: NaiveDate,
    ) -> Result<ExportRequest, CaptureError> {
        let key = format!("{CACHE_KEY_PREFIX}{day}");
        let cached = self.storage.get(&key, json!("")).await?;
        let mut cache = cached.as_str().unwrap_or_default().to_string();
        cache.push_str(&serde_json::to_string(record)?);
        cache.push('\n');
        self.storage.set(&key, Value::String(cache.clone())).await?;
        Ok(ExportRequest {
            destination: format!("{EXPORT_ROOT}/ndjson/{day}.ndjson"),
            mime: NDJSON_MIME.to_string(),
            contents: cache,
        })
    }
}
