//! Test helpers shared across watchlog crates.

pub mod document;
pub mod sink;
pub mod storage;

pub use document::StaticDocument;
pub use sink::RecordingSink;
pub use storage::{FailingStorage, MemoryStorage};
