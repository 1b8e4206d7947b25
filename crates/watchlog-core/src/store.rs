//! Deduplicating, capacity-bounded record store.

use crate::error::CaptureError;
use crate::model::MetadataRecord;
use crate::storage::StorageBackend;
use log::{debug, info};
use serde_json::json;
use std::sync::Arc;

/// Storage key holding the full record list.
const RECORDS_KEY: &str = "records";

/// Maximum records retained; the oldest is evicted first.
pub const RECORD_CAPACITY: usize = 2000;

/// Append-with-dedup view over the persisted record list, newest first.
///
/// [`RecordStore::upsert_if_absent`] is a read-modify-write across two
/// storage await points and is not transactional against a concurrent
/// writer; the host gives no cross-call primitive to close that window, so
/// it is documented rather than locked. A single browsing context keeps it
/// narrow in practice.
#[derive(Clone)]
pub struct RecordStore {
    storage: Arc<dyn StorageBackend>,
    capacity: usize,
}

impl RecordStore {
    /// Create a store with the default capacity bound.
    pub fn new(storage: Arc<dyn StorageBackend>) -> Self {
        Self::with_capacity(storage, RECORD_CAPACITY)
    }

    /// Create a store with an explicit capacity bound.
    pub fn with_capacity(storage: Arc<dyn StorageBackend>, capacity: usize) -> Self {
        Self { storage, capacity }
    }

    /// Insert the record unless its composite key is already present.
    /// Returns true if the record was inserted.
    pub async fn upsert_if_absent(&self, record: &MetadataRecord) -> Result<bool, CaptureError> {
        let mut records = self.list_all().await?;
        let key = record.composite_key();
        if records
            .iter()
            .any(|existing| existing.composite_key() == key)
        {
            debug!("record already present (key={key})");
            return Ok(false);
        }
        records.insert(0, record.clone());
        records.truncate(self.capacity);
        self.write_all(&records).await?;
        info!(
            "record stored (item_id={}, kind={:?}, total={})",
            record.item_id,
            record.kind,
            records.len()
        );
        Ok(true)
    }

    /// All records, newest first.
    pub async fn list_all(&self) -> Result<Vec<MetadataRecord>, CaptureError> {
        let value = self.storage.get(RECORDS_KEY, json!([])).await?;
        Ok(serde_json::from_value(value)?)
    }

    /// Records whose title or author contains `query`, case-insensitively.
    pub async fn search(&self, query: &str) -> Result<Vec<MetadataRecord>, CaptureError> {
        let mut records = self.list_all().await?;
        let query = query.to_lowercase();
        if query.is_empty() {
            return Ok(records);
        }
        records.retain(|record| {
            record.title.to_lowercase().contains(&query)
                || record
                    .author
                    .as_deref()
                    .is_some_and(|author| author.to_lowercase().contains(&query))
        });
        Ok(records)
    }

    /// Drop every record.
    pub async fn clear(&self) -> Result<(), CaptureError> {
        info!("clearing record store");
        self.write_all(&[]).await
    }

    /// Pretty-printed JSON of the full list, for the review surface's
    /// export action.
    pub async fn export_all_json(&self) -> Result<String, CaptureError> {
        let records = self.list_all().await?;
        Ok(serde_json::to_string_pretty(&records)?)
    }

    async fn write_all(&self, records: &[MetadataRecord]) -> Result<(), CaptureError> {
        self.storage
            .set(RECORDS_KEY, serde_json::to_value(records)?)
            .await
    }
}
