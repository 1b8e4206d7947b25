//! Record model for captured content items.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Navigation variant for a captured item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    /// Full watch-page view.
    Primary,
    /// Short-form view.
    Alternate,
    /// No recognizable item route.
    Unknown,
}

/// Captured metadata for one displayed content item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MetadataRecord {
    /// Canonical item identifier.
    pub item_id: String,
    /// Which navigation variant produced the capture.
    pub kind: ItemKind,
    /// Full address of the captured page.
    pub location: String,
    /// Item title; empty when every fallback missed.
    pub title: String,
    /// Author or channel name, if resolvable.
    pub author: Option<String>,
    /// Media duration in whole seconds, if known.
    pub duration_seconds: Option<u32>,
    /// Tag metadata, possibly empty.
    pub tags: Vec<String>,
    /// Timestamp taken at extraction time.
    pub captured_at: DateTime<Utc>,
}

impl MetadataRecord {
    /// Dedup key: item id plus full location, so the same item reached
    /// through different addresses (chapters, extra params) stays distinct.
    pub fn composite_key(&self) -> String {
        format!("{}|{}", self.item_id, self.location)
    }
}

#[cfg(test)]
mod tests {
    use super::{ItemKind, MetadataRecord};
    use chrono::Utc;
    use pretty_assertions::assert_eq;

    #[test]
    fn composite_key_uses_id_and_location() {
        let record = MetadataRecord {
            item_id: "abc123XYZ00".to_string(),
            kind: ItemKind::Primary,
            location: "https://example.com/watch?v=abc123XYZ00&t=10".to_string(),
            title: "A title".to_string(),
            author: None,
            duration_seconds: None,
            tags: Vec::new(),
            captured_at: Utc::now(),
        };
        assert_eq!(
            record.composite_key(),
            "abc123XYZ00|https://example.com/watch?v=abc123XYZ00&t=10"
        );
    }

    #[test]
    fn kind_serializes_snake_case() {
        let json = serde_json::to_string(&ItemKind::Alternate).expect("serialize");
        assert_eq!(json, "\"alternate\"");
    }
}
