// crates/snapcheck-core/src/runtime/verifier.rs
// ============================================================================
// Module: Snapcheck Verifier
// Description: Record lookup and verification report construction.
// Purpose: Turn matching runs into consumable pass/fail reports.
// Dependencies: crate::core, crate::runtime::matcher
// ============================================================================

//! ## Overview
//! The verifier is the consumer-facing entry point: locate the record for a
//! test identifier and compare its recorded content against a live capture.
//! A missing record fails closed as its own status rather than degrading to
//! an empty comparison. Reports carry a canonical digest of the recorded
//! content so fixture drift is identifiable from report output alone.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Serialize;
use serde_json::Value;

use crate::core::digest::ContentDigest;
use crate::core::identifiers::TestId;
use crate::core::record::SnapshotDocument;
use crate::runtime::matcher::Bindings;
use crate::runtime::matcher::MatchError;
use crate::runtime::matcher::MatchLimits;
use crate::runtime::matcher::Mismatch;
use crate::runtime::matcher::match_content;

// ============================================================================
// SECTION: Verification Reports
// ============================================================================

/// Outcome classification of one verification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationStatus {
    /// The live capture matched the recorded content.
    Passed,
    /// The live capture diverged from the recorded content.
    Failed,
    /// No record exists for the requested test identifier.
    MissingRecord,
}

/// Result of verifying one live capture against one stored record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VerificationReport {
    /// Identifier of the record that was verified.
    pub test_id: TestId,
    /// Outcome classification.
    pub status: VerificationStatus,
    /// Canonical digest of the recorded content, absent for missing records.
    pub content_digest: Option<ContentDigest>,
    /// Mismatches found, empty on pass or missing record.
    pub mismatches: Vec<Mismatch>,
    /// Whether the mismatch list was truncated at the configured cap.
    pub truncated: bool,
    /// Token captures accumulated while matching.
    pub bindings: Bindings,
}

// ============================================================================
// SECTION: Verifier
// ============================================================================

/// Verifies live captures against the records of one snapshot document.
#[derive(Debug, Clone)]
pub struct SnapshotVerifier<'doc> {
    /// The document holding recorded snapshots.
    document: &'doc SnapshotDocument,
    /// Limits applied to each matching run.
    limits: MatchLimits,
}

impl<'doc> SnapshotVerifier<'doc> {
    /// Creates a verifier over a document with default limits.
    #[must_use]
    pub fn new(document: &'doc SnapshotDocument) -> Self {
        Self::with_limits(document, MatchLimits::default())
    }

    /// Creates a verifier over a document with explicit limits.
    #[must_use]
    pub const fn with_limits(document: &'doc SnapshotDocument, limits: MatchLimits) -> Self {
        Self {
            document,
            limits,
        }
    }

    /// Verifies a live capture against the record for `test_id`.
    ///
    /// # Errors
    ///
    /// Returns [`MatchError`] when the recorded side itself is invalid
    /// (malformed placeholder or excessive depth). Live-side divergence is
    /// reported through the returned report, never as an error.
    pub fn verify(
        &self,
        test_id: &TestId,
        live: &Value,
    ) -> Result<VerificationReport, MatchError> {
        let Some(record) = self.document.get(test_id) else {
            return Ok(VerificationReport {
                test_id: test_id.clone(),
                status: VerificationStatus::MissingRecord,
                content_digest: None,
                mismatches: Vec::new(),
                truncated: false,
                bindings: Bindings::new(),
            });
        };

        let report = match_content(&record.recorded_content, live, &self.limits)?;
        let status = if report.is_match() {
            VerificationStatus::Passed
        } else {
            VerificationStatus::Failed
        };
        let content_digest = ContentDigest::of_canonical_json(&record.recorded_content).ok();
        Ok(VerificationReport {
            test_id: test_id.clone(),
            status,
            content_digest,
            mismatches: report.mismatches,
            truncated: report.truncated,
            bindings: report.bindings,
        })
    }
}
