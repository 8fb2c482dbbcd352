// crates/snapcheck-core/tests/store.rs
// ============================================================================
// Module: Store Tests
// Description: Verifies file-backed and in-memory snapshot stores.
// ============================================================================
//! ## Overview
//! Ensures stores report absent fixtures as `None`, round-trip documents,
//! enforce size limits, and replace fixtures without leaving staging files
//! behind.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    missing_docs,
    clippy::missing_docs_in_private_items,
    reason = "Test-only output and panic-based assertions are permitted."
)]

use std::fs;

use serde_json::json;
use snapcheck_core::FileSnapshotStore;
use snapcheck_core::InMemorySnapshotStore;
use snapcheck_core::RecordedDate;
use snapcheck_core::SnapshotDocument;
use snapcheck_core::SnapshotRecord;
use snapcheck_core::SnapshotStore;
use snapcheck_core::StoreError;
use snapcheck_core::TestId;
use tempfile::tempdir;

fn sample_document() -> SnapshotDocument {
    let recorded_date: RecordedDate = "06-08-2026, 14:11:09".parse().expect("date");
    let record = SnapshotRecord::new(
        recorded_date,
        json!({"describe_domain": {"DomainStatus": {"Created": true}}}),
    )
    .expect("record");
    let mut document = SnapshotDocument::new();
    document
        .insert(TestId::new("system_tests::search_domain::test_domain").expect("id"), record);
    document
}

#[test]
fn missing_fixture_loads_as_none() {
    let dir = tempdir().expect("tempdir");
    let store = FileSnapshotStore::new(dir.path().join("absent.snapshot.json"));
    assert!(store.load().expect("load").is_none());
}

#[test]
fn file_store_round_trips_documents() {
    let dir = tempdir().expect("tempdir");
    let store = FileSnapshotStore::new(dir.path().join("search_domain.snapshot.json"));
    let document = sample_document();
    store.save(&document).expect("save");
    let loaded = store.load().expect("load").expect("document");
    assert_eq!(loaded, document);
}

#[test]
fn save_replaces_previous_fixture() {
    let dir = tempdir().expect("tempdir");
    let store = FileSnapshotStore::new(dir.path().join("search_domain.snapshot.json"));
    store.save(&sample_document()).expect("first save");

    let mut regenerated = sample_document();
    let recorded_date: RecordedDate = "07-08-2026, 09:30:00".parse().expect("date");
    let record = SnapshotRecord::new(
        recorded_date,
        json!({"describe_domain": {"DomainStatus": {"Created": false}}}),
    )
    .expect("record");
    regenerated
        .insert(TestId::new("system_tests::search_domain::test_domain").expect("id"), record);
    store.save(&regenerated).expect("second save");

    let loaded = store.load().expect("load").expect("document");
    assert_eq!(loaded, regenerated);
}

#[test]
fn save_leaves_no_staging_files_behind() {
    let dir = tempdir().expect("tempdir");
    let store = FileSnapshotStore::new(dir.path().join("search_domain.snapshot.json"));
    store.save(&sample_document()).expect("save");
    let entries: Vec<_> = fs::read_dir(dir.path())
        .expect("read dir")
        .map(|entry| entry.expect("entry").file_name())
        .collect();
    assert_eq!(entries, vec!["search_domain.snapshot.json"]);
}

#[test]
fn oversized_fixture_fails_to_load() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("search_domain.snapshot.json");
    let store = FileSnapshotStore::with_limit(&path, 8);
    let unlimited = FileSnapshotStore::new(&path);
    unlimited.save(&sample_document()).expect("save");
    let err = store.load().unwrap_err();
    assert!(matches!(err, StoreError::Document { .. }));
}

#[test]
fn corrupt_fixture_fails_to_load() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("search_domain.snapshot.json");
    fs::write(&path, b"{ torn write").expect("write");
    let store = FileSnapshotStore::new(&path);
    let err = store.load().unwrap_err();
    assert!(matches!(err, StoreError::Document { .. }));
}

#[test]
fn in_memory_store_round_trips_documents() {
    let store = InMemorySnapshotStore::new();
    assert!(store.load().expect("empty load").is_none());
    let document = sample_document();
    store.save(&document).expect("save");
    let loaded = store.load().expect("load").expect("document");
    assert_eq!(loaded, document);
}
