// system-tests/tests/regeneration.rs
// ============================================================================
// Module: Regeneration Suite
// Description: Record/overwrite lifecycle against a copy of the fixture.
// Purpose: Exercise golden regeneration without touching the committed file.
// Dependencies: helpers, snapcheck-core, tempfile
// ============================================================================

//! Regeneration suite entry point for system-tests.

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

mod helpers;

use std::fs;
use std::path::PathBuf;

use serde_json::json;
use snapcheck_core::FileSnapshotStore;
use snapcheck_core::RecordOutcome;
use snapcheck_core::RecordedDate;
use snapcheck_core::SnapshotRecorder;
use snapcheck_core::SnapshotStore;
use snapcheck_core::TestId;
use tempfile::TempDir;

use crate::helpers::fixture_bytes;
use crate::helpers::test_domain_id;

/// Copies the committed fixture into a temp directory for mutation.
fn working_copy(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("search_domain.snapshot.json");
    fs::write(&path, fixture_bytes()).expect("seed working copy");
    path
}

/// Parses a recorded date used to stamp regenerated records.
fn stamp(text: &str) -> RecordedDate {
    text.parse().expect("recorded date")
}

#[test]
fn regeneration_overwrites_only_the_target_record() {
    let dir = TempDir::new().expect("tempdir");
    let path = working_copy(&dir);
    let store = FileSnapshotStore::new(&path);
    let mut document = store.load().expect("load").expect("document");

    let replacement = json!({
        "describe_domain": {
            "DomainStatus": {
                "DomainName": "<domain-name:1>",
                "EngineVersion": "OpenSearch_2.7"
            },
            "ResponseMetadata": {"HTTPHeaders": {}, "HTTPStatusCode": 200}
        },
        "list_tags": {
            "ResponseMetadata": {"HTTPHeaders": {}, "HTTPStatusCode": 200},
            "TagList": []
        }
    });
    let recorder = SnapshotRecorder::new();
    let outcome = recorder
        .record(&mut document, test_domain_id(), replacement.clone(), stamp("07-08-2026, 09:30:00"))
        .expect("record");
    assert_eq!(outcome, RecordOutcome::Replaced);
    store.save(&document).expect("save");

    let reloaded = store.load().expect("reload").expect("document");
    assert_eq!(reloaded.len(), 2);
    let regenerated = reloaded.get(&test_domain_id()).expect("regenerated record");
    assert_eq!(regenerated.recorded_date, stamp("07-08-2026, 09:30:00"));
    assert_eq!(regenerated.recorded_content, replacement);

    let untouched = reloaded
        .get(&crate::helpers::alternative_types_id())
        .expect("untouched record");
    assert_eq!(untouched.recorded_date, stamp("06-08-2026, 14:12:47"));
}

#[test]
fn first_run_of_a_new_test_creates_a_record() {
    let dir = TempDir::new().expect("tempdir");
    let path = working_copy(&dir);
    let store = FileSnapshotStore::new(&path);
    let mut document = store.load().expect("load").expect("document");

    let new_id = TestId::new("system_tests::search_domain::test_domain_tags").expect("id");
    let recorder = SnapshotRecorder::new();
    let outcome = recorder
        .record(
            &mut document,
            new_id.clone(),
            json!({
                "list_tags": {
                    "ResponseMetadata": {"HTTPHeaders": {}, "HTTPStatusCode": 200},
                    "TagList": [{"Key": "Environment", "Value": "integration"}]
                }
            }),
            stamp("07-08-2026, 09:31:12"),
        )
        .expect("record");
    assert_eq!(outcome, RecordOutcome::Created);
    store.save(&document).expect("save");

    let reloaded = store.load().expect("reload").expect("document");
    assert_eq!(reloaded.len(), 3);
    assert!(reloaded.get(&new_id).is_some());
}

#[test]
fn saved_working_copy_stays_canonical() {
    let dir = TempDir::new().expect("tempdir");
    let path = working_copy(&dir);
    let store = FileSnapshotStore::new(&path);
    let document = store.load().expect("load").expect("document");
    store.save(&document).expect("save");

    let bytes = fs::read(&path).expect("read saved bytes");
    assert_eq!(bytes, fixture_bytes(), "an unchanged save must reproduce the committed bytes");
}

#[test]
fn committed_fixture_is_never_mutated_by_suites() {
    // The committed fixture is the regression baseline; suites only ever
    // mutate temp copies. Guard the invariant by checking read-only flows.
    let before = fixture_bytes();
    let dir = TempDir::new().expect("tempdir");
    let path = working_copy(&dir);
    let store = FileSnapshotStore::new(&path);
    let mut document = store.load().expect("load").expect("document");
    document.remove(&test_domain_id());
    store.save(&document).expect("save");

    assert_eq!(fixture_bytes(), before);
}
