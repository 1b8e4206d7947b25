//! Shared persistence collaborator.

use crate::error::CaptureError;
use async_trait::async_trait;
use log::info;
use parking_lot::Mutex;
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};

/// Asynchronous key-value persistence used by the store and export cache.
///
/// Every call crosses an async boundary and is atomic per key only; callers
/// get no transaction across a get followed by a set.
#[async_trait]
pub trait StorageBackend: Send + Sync {
    /// Read the value stored at `key`, or `default` when absent.
    async fn get(&self, key: &str, default: Value) -> Result<Value, CaptureError>;

    /// Persist `value` at `key`, replacing any previous value.
    async fn set(&self, key: &str, value: Value) -> Result<(), CaptureError>;
}

/// JSON-file-backed storage backend.
///
/// Keeps the whole keyspace as one JSON object in a single file; writes go
/// through a temp file and rename so a crash never leaves a half-written
/// store. A process-local lock serializes writers, but the get/set pair
/// used by callers is still not transactional.
pub struct FileStorage {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileStorage {
    /// Create a backend persisting to the given file, creating parent
    /// directories as needed.
    pub fn new(path: impl AsRef<Path>) -> Result<Self, CaptureError> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        info!("initialized file storage (path={})", path.display());
        Ok(Self {
            path,
            write_lock: Mutex::new(()),
        })
    }

    fn read_map(&self) -> Result<Map<String, Value>, CaptureError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Map::new());
            }
            Err(err) => return Err(err.into()),
        };
        let value: Value = serde_json::from_str(&text)?;
        Ok(value.as_object().cloned().unwrap_or_default())
    }

    fn write_map(&self, map: &Map<String, Value>) -> Result<(), CaptureError> {
        let temp_path = self.path.with_extension("json.tmp");
        fs::write(&temp_path, serde_json::to_string(map)?)?;
        fs::rename(temp_path, &self.path)?;
        Ok(())
    }
}

#[async_trait]
impl StorageBackend for FileStorage {
    async fn get(&self, key: &str, default: Value) -> Result<Value, CaptureError> {
        let map = self.read_map()?;
        Ok(map.get(key).cloned().unwrap_or(default))
    }

    async fn set(&self, key: &str, value: Value) -> Result<(), CaptureError> {
        let _guard = self.write_lock.lock();
        let mut map = self.read_map()?;
        map.insert(key.to_string(), value);
        self.write_map(&map)
    }
}

#[cfg(test)]
mod tests {
    use super::{FileStorage, StorageBackend};
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use tempfile::tempdir;

    #[tokio::test]
    async fn get_returns_default_when_file_missing() {
        let temp = tempdir().expect("tempdir");
        let storage = FileStorage::new(temp.path().join("state.json")).expect("storage");
        let value = storage.get("records", json!([])).await.expect("get");
        assert_eq!(value, json!([]));
    }

    #[tokio::test]
    async fn set_then_get_round_trips() {
        let temp = tempdir().expect("tempdir");
        let storage = FileStorage::new(temp.path().join("state.json")).expect("storage");
        storage
            .set("records", json!([{"a": 1}]))
            .await
            .expect("set");
        let value = storage.get("records", json!([])).await.expect("get");
        assert_eq!(value, json!([{"a": 1}]));
    }

    #[tokio::test]
    async fn set_preserves_other_keys() {
        let temp = tempdir().expect("tempdir");
        let storage = FileStorage::new(temp.path().join("state.json")).expect("storage");
        storage.set("a", json!(1)).await.expect("set a");
        storage.set("b", json!(2)).await.expect("set b");
        assert_eq!(storage.get("a", json!(0)).await.expect("get a"), json!(1));
        assert_eq!(storage.get("b", json!(0)).await.expect("get b"), json!(2));
    }

    #[tokio::test]
    async fn values_survive_reopening() {
        let temp = tempdir().expect("tempdir");
        let path = temp.path().join("state.json");
        {
            let storage = FileStorage::new(&path).expect("storage");
            storage.set("key", json!("value")).await.expect("set");
        }
        let storage = FileStorage::new(&path).expect("reopen");
        assert_eq!(
            storage.get("key", json!(null)).await.expect("get"),
            json!("value")
        );
    }
}
