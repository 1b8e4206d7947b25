//! Debounced navigation detection and the capture pipeline.
//!
//! Five independent trigger sources collapse into one entry point,
//! [`CapturePipeline::request_capture`]. The debounce guard is keyed by the
//! resolved item id, not by which source fired, and is only a cheap early
//! exit: overlapping invocations can each pass their own check before any of
//! them records the new id. The record store's composite-key dedup is the
//! authoritative boundary for that race.

use crate::document::DocumentSurface;
use crate::error::CaptureError;
use crate::export::ExportRouter;
use crate::extract::extract;
use crate::identity::resolve_identity;
use crate::store::RecordStore;
use log::{debug, warn};
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Settle delay after a trigger, letting the new page begin rendering.
const RENDER_SETTLE: Duration = Duration::from_millis(300);
/// Second settle delay, letting metadata-bearing elements finish rendering.
const METADATA_SETTLE: Duration = Duration::from_millis(500);

/// Event sources that can request a capture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerSource {
    /// Host app signalled that navigation finished.
    NavigationFinished,
    /// Host app signalled that page data updated.
    DataUpdated,
    /// The title element mutated.
    TitleMutation,
    /// The main content subtree mutated.
    ContentMutation,
    /// One-shot trigger fired at install time.
    InitialLoad,
}

/// Result of one capture attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureOutcome {
    /// A record was extracted and handed to store and export.
    Captured {
        /// Whether the store actually inserted it (false on dedup).
        inserted: bool,
    },
    /// No item id was resolvable from the location.
    NoIdentity,
    /// The resolved id matches the previous capture; nothing to do.
    AlreadySeen,
    /// The id vanished between the guard and extraction; the next trigger
    /// retries.
    ExtractionRaced,
}

/// Ties identity resolution, extraction, store, and export together behind
/// a single debounced entry point.
pub struct CapturePipeline {
    document: Arc<dyn DocumentSurface>,
    store: RecordStore,
    exporter: ExportRouter,
    last_seen: Mutex<Option<String>>,
}

impl CapturePipeline {
    /// Create a pipeline over the given collaborators.
    pub fn new(document: Arc<dyn DocumentSurface>, store: RecordStore, exporter: ExportRouter) -> Self {
        Self {
            document,
            store,
            exporter,
            last_seen: Mutex::new(None),
        }
    }

    /// Run one capture attempt.
    ///
    /// The guard read happens synchronously before the second settle delay,
    /// but several invocations can be in flight at once, each past its own
    /// check before any writes `last_seen`. Store dedup makes that overlap
    /// harmless. Store and export run sequentially and awaited; a record
    /// that failed to store never reaches export.
    pub async fn request_capture(
        &self,
        source: TriggerSource,
    ) -> Result<CaptureOutcome, CaptureError> {
        debug!("capture requested (source={source:?})");
        tokio::time::sleep(RENDER_SETTLE).await;

        let identity = resolve_identity(&self.document.location());
        let Some(item_id) = identity.item_id else {
            return Ok(CaptureOutcome::NoIdentity);
        };
        if self.last_seen.lock().as_deref() == Some(item_id.as_str()) {
            debug!("already captured (item_id={item_id})");
            return Ok(CaptureOutcome::AlreadySeen);
        }

        tokio::time::sleep(METADATA_SETTLE).await;

        let Some(record) = extract(self.document.as_ref()) else {
            warn!("item id vanished during extraction (item_id={item_id})");
            return Ok(CaptureOutcome::ExtractionRaced);
        };
        *self.last_seen.lock() = Some(record.item_id.clone());

        let inserted = self.store.upsert_if_absent(&record).await?;
        if inserted {
            self.exporter.handle(&record).await?;
        }
        Ok(CaptureOutcome::Captured { inserted })
    }
}

/// Consume triggers from `receiver`, running one capture task per trigger.
///
/// Each invocation is wrapped so a storage or sink failure is logged and
/// dropped instead of poisoning the listener loop; the next trigger gets a
/// fresh attempt.
pub fn spawn_listener(
    pipeline: Arc<CapturePipeline>,
    mut receiver: mpsc::UnboundedReceiver<TriggerSource>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(source) = receiver.recv().await {
            let pipeline = Arc::clone(&pipeline);
            tokio::spawn(async move {
                if let Err(err) = pipeline.request_capture(source).await {
                    warn!("capture failed (source={source:?}): {err}");
                }
            });
        }
        debug!("trigger channel closed, listener exiting");
    })
}

/// Wire the listener and fire the one-shot initial-load trigger.
///
/// Returns the sender that trigger sources push into, plus the listener
/// handle.
pub fn install(
    pipeline: Arc<CapturePipeline>,
) -> (mpsc::UnboundedSender<TriggerSource>, JoinHandle<()>) {
    let (sender, receiver) = mpsc::unbounded_channel();
    let handle = spawn_listener(pipeline, receiver);
    let _ = sender.send(TriggerSource::InitialLoad);
    (sender, handle)
}
