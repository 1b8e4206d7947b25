use async_trait::async_trait;
use parking_lot::Mutex;
use watchlog_core::{CaptureError, ExportRequest, ExportSink};

/// Sink that records every write for assertions.
#[derive(Default)]
pub struct RecordingSink {
    writes: Mutex<Vec<ExportRequest>>,
    fail: bool,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// A sink whose every write fails after being recorded nowhere.
    pub fn failing() -> Self {
        Self {
            writes: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    /// All requests written so far, in order.
    pub fn writes(&self) -> Vec<ExportRequest> {
        self.writes.lock().clone()
    }
}

#[async_trait]
impl ExportSink for RecordingSink {
    async fn write(&self, request: &ExportRequest) -> Result<(), CaptureError> {
        if self.fail {
            return Err(CaptureError::Sink("stub sink failure".to_string()));
        }
        self.writes.lock().push(request.clone());
        Ok(())
    }
}
