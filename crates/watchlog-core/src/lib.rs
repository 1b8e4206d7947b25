//! Capture pipeline for single-page-app navigation.
//!
//! This crate owns identity resolution, field extraction, the debounced
//! navigation detector, the deduplicating record store, and export routing.
//! The host environment is reached only through the collaborator traits
//! ([`DocumentSurface`], [`StorageBackend`], [`ExportSink`]).

pub mod document;
pub mod error;
pub mod export;
pub mod extract;
pub mod identity;
pub mod model;
pub mod pipeline;
pub mod sink;
pub mod storage;
pub mod store;

pub use document::DocumentSurface;
pub use error::CaptureError;
pub use export::ExportRouter;
pub use identity::{Identity, resolve_identity};
pub use model::{ItemKind, MetadataRecord};
/// Navigation detection entry points.
pub use pipeline::{CaptureOutcome, CapturePipeline, TriggerSource, install, spawn_listener};
pub use sink::{ExportRequest, ExportSink, FsSink};
pub use storage::{FileStorage, StorageBackend};
pub use store::{RECORD_CAPACITY, RecordStore};
