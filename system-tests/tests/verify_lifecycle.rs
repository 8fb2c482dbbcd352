// system-tests/tests/verify_lifecycle.rs
// ============================================================================
// Module: Verification Lifecycle Suite
// Description: End-to-end verification of live captures against the fixture.
// Purpose: Exercise the consumer contract over the committed golden records.
// Dependencies: helpers, snapcheck-core
// ============================================================================

//! Verification lifecycle suite entry point for system-tests.

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

use serde_json::Value;
use serde_json::json;
use snapcheck_core::MismatchKind;
use snapcheck_core::SnapshotVerifier;
use snapcheck_core::TestId;
use snapcheck_core::VerificationStatus;

use crate::helpers::alternative_types_id;
use crate::helpers::default_substitutions;
use crate::helpers::load_fixture;
use crate::helpers::synthesize_live;
use crate::helpers::test_domain_id;

/// Returns a mutable reference to the value at a dotted path.
fn content_at_mut<'v>(content: &'v mut Value, path: &str) -> &'v mut Value {
    let mut current = content;
    for part in path.split('.') {
        current = current
            .get_mut(part)
            .unwrap_or_else(|| panic!("missing {part} while resolving {path}"));
    }
    current
}

#[test]
fn synthesized_live_capture_passes_verification() {
    let document = load_fixture();
    let record = document.get(&test_domain_id()).expect("record");
    let live = synthesize_live(&record.recorded_content, &default_substitutions());

    let verifier = SnapshotVerifier::new(&document);
    let report = verifier.verify(&test_domain_id(), &live).expect("verify");
    assert_eq!(report.status, VerificationStatus::Passed, "mismatches: {:?}", report.mismatches);
    assert!(report.content_digest.is_some());
    assert_eq!(report.bindings.get("<account-id>"), Some(&json!("123456789012")));
    assert_eq!(report.bindings.get("<domain-name:1>"), Some(&json!("my-search-domain")));
}

#[test]
fn both_committed_records_verify_against_their_syntheses() {
    let document = load_fixture();
    let verifier = SnapshotVerifier::new(&document);
    for test_id in [test_domain_id(), alternative_types_id()] {
        let record = document.get(&test_id).expect("record");
        let live = synthesize_live(&record.recorded_content, &default_substitutions());
        let report = verifier.verify(&test_id, &live).expect("verify");
        assert_eq!(
            report.status,
            VerificationStatus::Passed,
            "record {test_id} mismatches: {:?}",
            report.mismatches
        );
    }
}

#[test]
fn diverging_literal_fails_with_its_path() {
    let document = load_fixture();
    let record = document.get(&test_domain_id()).expect("record");
    let mut live = synthesize_live(&record.recorded_content, &default_substitutions());
    *content_at_mut(&mut live, "describe_domain.DomainStatus.EngineVersion") =
        json!("OpenSearch_2.3");

    let verifier = SnapshotVerifier::new(&document);
    let report = verifier.verify(&test_domain_id(), &live).expect("verify");
    assert_eq!(report.status, VerificationStatus::Failed);
    assert_eq!(report.mismatches.len(), 1);
    assert_eq!(
        report.mismatches[0].path.to_string(),
        "describe_domain.DomainStatus.EngineVersion"
    );
}

#[test]
fn inconsistent_redacted_account_fails_verification() {
    let document = load_fixture();
    let record = document.get(&test_domain_id()).expect("record");
    let mut live = synthesize_live(&record.recorded_content, &default_substitutions());
    // DomainId reuses the account captured from the ARN; give it another one.
    *content_at_mut(&mut live, "describe_domain.DomainStatus.DomainId") =
        json!("999999999999/my-search-domain");

    let verifier = SnapshotVerifier::new(&document);
    let report = verifier.verify(&test_domain_id(), &live).expect("verify");
    assert_eq!(report.status, VerificationStatus::Failed);
    assert!(report.mismatches.iter().any(|mismatch| matches!(
        mismatch.kind,
        MismatchKind::TemplateMismatch { .. } | MismatchKind::BindingConflict { .. }
    )));
}

#[test]
fn unknown_identifier_reports_missing_record() {
    let document = load_fixture();
    let verifier = SnapshotVerifier::new(&document);
    let absent = TestId::new("system_tests::search_domain::test_absent").expect("id");
    let report = verifier.verify(&absent, &json!({})).expect("verify");
    assert_eq!(report.status, VerificationStatus::MissingRecord);
    assert!(report.content_digest.is_none());
    assert!(report.mismatches.is_empty());
}

#[test]
fn content_digest_is_stable_across_runs() {
    let document = load_fixture();
    let record = document.get(&test_domain_id()).expect("record");
    let live = synthesize_live(&record.recorded_content, &default_substitutions());
    let verifier = SnapshotVerifier::new(&document);

    let first = verifier.verify(&test_domain_id(), &live).expect("verify");
    let second = verifier.verify(&test_domain_id(), &live).expect("verify");
    assert_eq!(first.content_digest, second.content_digest);
}

#[test]
fn extra_live_operation_is_reported_as_unexpected() {
    let document = load_fixture();
    let record = document.get(&test_domain_id()).expect("record");
    let mut live = synthesize_live(&record.recorded_content, &default_substitutions());
    let Value::Object(operations) = &mut live else {
        panic!("live content must be an object");
    };
    operations.insert("delete_domain".to_string(), json!({"Acknowledged": true}));

    let verifier = SnapshotVerifier::new(&document);
    let report = verifier.verify(&test_domain_id(), &live).expect("verify");
    assert_eq!(report.status, VerificationStatus::Failed);
    assert!(report.mismatches.iter().any(|mismatch| matches!(
        &mismatch.kind,
        MismatchKind::UnexpectedKey { key } if key == "delete_domain"
    )));
}
