use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;
use std::collections::HashMap;
use watchlog_core::{CaptureError, StorageBackend};

/// In-memory storage backend.
#[derive(Default)]
pub struct MemoryStorage {
    values: Mutex<HashMap<String, Value>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw stored value for assertions, if any.
    pub fn raw(&self, key: &str) -> Option<Value> {
        self.values.lock().get(key).cloned()
    }
}

#[async_trait]
impl StorageBackend for MemoryStorage {
    async fn get(&self, key: &str, default: Value) -> Result<Value, CaptureError> {
        Ok(self.values.lock().get(key).cloned().unwrap_or(default))
    }

    async fn set(&self, key: &str, value: Value) -> Result<(), CaptureError> {
        self.values.lock().insert(key.to_string(), value);
        Ok(())
    }
}

/// Storage backend whose every call fails.
#[derive(Default)]
pub struct FailingStorage;

impl FailingStorage {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl StorageBackend for FailingStorage {
    async fn get(&self, _key: &str, _default: Value) -> Result<Value, CaptureError> {
        Err(CaptureError::Storage("stub storage failure".to_string()))
    }

    async fn set(&self, _key: &str, _value: Value) -> Result<(), CaptureError> {
        Err(CaptureError::Storage("stub storage failure".to_string()))
    }
}
