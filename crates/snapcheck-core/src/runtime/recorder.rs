// crates/snapcheck-core/src/runtime/recorder.rs
// ============================================================================
// Module: Snapcheck Recorder
// Description: Capture and regeneration lifecycle for snapshot records.
// Purpose: Insert or overwrite records without partial mutation.
// Dependencies: crate::core
// ============================================================================

//! ## Overview
//! Recording creates a snapshot the first time a test runs and overwrites it
//! when expected behavior intentionally changes. Content is validated before
//! the document is touched, so a failed capture never leaves a half-written
//! record behind. The recorder never reads wall-clock time; callers stamp
//! captures explicitly.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde_json::Value;

use crate::core::identifiers::TestId;
use crate::core::record::RecordError;
use crate::core::record::SnapshotDocument;
use crate::core::record::SnapshotRecord;
use crate::core::time::RecordedDate;

// ============================================================================
// SECTION: Record Outcome
// ============================================================================

/// Whether a recording created a new record or regenerated an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordOutcome {
    /// No record existed for the identifier; one was created.
    Created,
    /// An existing record was overwritten (regeneration).
    Replaced,
}

// ============================================================================
// SECTION: Recorder
// ============================================================================

/// Records captured content into snapshot documents.
#[derive(Debug, Clone, Copy, Default)]
pub struct SnapshotRecorder;

impl SnapshotRecorder {
    /// Creates a recorder.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Records captured content under `test_id`, stamped with `recorded_at`.
    ///
    /// Validation runs before any mutation: on error the document is
    /// untouched.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError`] when the content violates record invariants.
    pub fn record(
        &self,
        document: &mut SnapshotDocument,
        test_id: TestId,
        content: Value,
        recorded_at: RecordedDate,
    ) -> Result<RecordOutcome, RecordError> {
        let record = SnapshotRecord::new(recorded_at, content)?;
        let replaced = document.insert(test_id, record);
        Ok(match replaced {
            Some(_) => RecordOutcome::Replaced,
            None => RecordOutcome::Created,
        })
    }
}
