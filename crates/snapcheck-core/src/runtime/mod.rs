// crates/snapcheck-core/src/runtime/mod.rs
// ============================================================================
// Module: Snapcheck Runtime
// Description: Matching, verification, recording, and storage runtime.
// Purpose: Implement the consumer contract over snapshot documents.
// Dependencies: crate::core
// ============================================================================

//! ## Overview
//! The runtime layers the consumer contract over the document model: the
//! matcher applies placeholder-aware deep equality, the verifier looks up
//! records and produces reports, the recorder implements the capture and
//! regeneration lifecycle, and stores move documents to and from disk.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod matcher;
pub mod recorder;
pub mod store;
pub mod verifier;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use matcher::Bindings;
pub use matcher::MatchError;
pub use matcher::MatchLimits;
pub use matcher::MatchReport;
pub use matcher::Mismatch;
pub use matcher::MismatchKind;
pub use matcher::ValuePath;
pub use matcher::match_content;
pub use recorder::RecordOutcome;
pub use recorder::SnapshotRecorder;
pub use store::DEFAULT_MAX_FIXTURE_BYTES;
pub use store::FileSnapshotStore;
pub use store::InMemorySnapshotStore;
pub use store::SnapshotStore;
pub use store::StoreError;
pub use verifier::SnapshotVerifier;
pub use verifier::VerificationReport;
pub use verifier::VerificationStatus;
