//! Record store tests.

use chrono::Utc;
use pretty_assertions::assert_eq;
use std::sync::Arc;
use watchlog_core::model::{ItemKind, MetadataRecord};
use watchlog_core::store::RecordStore;
use watchlog_test_utils::MemoryStorage;

fn record(item_id: &str, location: &str) -> MetadataRecord {
    MetadataRecord {
        item_id: item_id.to_string(),
        kind: ItemKind::Primary,
        location: location.to_string(),
        title: format!("Title {item_id}"),
        author: Some("Channel".to_string()),
        duration_seconds: Some(60),
        tags: Vec::new(),
        captured_at: Utc::now(),
    }
}

fn store() -> RecordStore {
    RecordStore::new(Arc::new(MemoryStorage::new()))
}

#[tokio::test]
async fn duplicate_composite_key_is_rejected() {
    let store = store();
    let rec = record("id-one", "https://example.com/watch?v=id-one");
    assert!(store.upsert_if_absent(&rec).await.expect("first"));
    assert!(!store.upsert_if_absent(&rec).await.expect("second"));
    assert_eq!(store.list_all().await.expect("list").len(), 1);
}

#[tokio::test]
async fn same_id_different_location_both_persist() {
    let store = store();
    let a = record("id-one", "https://example.com/watch?v=id-one");
    let b = record("id-one", "https://example.com/watch?v=id-one&t=30");
    assert!(store.upsert_if_absent(&a).await.expect("a"));
    assert!(store.upsert_if_absent(&b).await.expect("b"));
    assert_eq!(store.list_all().await.expect("list").len(), 2);
}

#[tokio::test]
async fn capacity_evicts_oldest_and_keeps_newest_first() {
    let store = RecordStore::with_capacity(Arc::new(MemoryStorage::new()), 3);
    for id in ["first", "second", "third", "fourth"] {
        let rec = record(id, &format!("https://example.com/watch?v={id}"));
        assert!(store.upsert_if_absent(&rec).await.expect("insert"));
    }
    let records = store.list_all().await.expect("list");
    let ids: Vec<&str> = records.iter().map(|r| r.item_id.as_str()).collect();
    assert_eq!(ids, vec!["fourth", "third", "second"]);
}

#[tokio::test]
async fn search_matches_title_and_author_case_insensitively() {
    let store = store();
    let mut by_title = record("id-one", "https://example.com/watch?v=id-one");
    by_title.title = "Learning Rust".to_string();
    let mut by_author = record("id-two", "https://example.com/watch?v=id-two");
    by_author.author = Some("Rustacean Station".to_string());
    let neither = record("id-three", "https://example.com/watch?v=id-three");
    for rec in [&by_title, &by_author, &neither] {
        store.upsert_if_absent(rec).await.expect("insert");
    }

    let hits = store.search("RUST").await.expect("search");
    let ids: Vec<&str> = hits.iter().map(|r| r.item_id.as_str()).collect();
    assert_eq!(ids, vec!["id-two", "id-one"]);
}

#[tokio::test]
async fn clear_empties_the_store() {
    let store = store();
    let rec = record("id-one", "https://example.com/watch?v=id-one");
    store.upsert_if_absent(&rec).await.expect("insert");
    store.clear().await.expect("clear");
    assert_eq!(store.list_all().await.expect("list"), Vec::new());
}

#[tokio::test]
async fn export_all_json_is_pretty_printed() {
    let store = store();
    let rec = record("id-one", "https://example.com/watch?v=id-one");
    store.upsert_if_absent(&rec).await.expect("insert");
    let json = store.export_all_json().await.expect("export");
    assert!(json.contains("\n"));
    let parsed: Vec<MetadataRecord> = serde_json::from_str(&json).expect("parse");
    assert_eq!(parsed, vec![rec]);
}
