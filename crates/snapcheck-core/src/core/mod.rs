// crates/snapcheck-core/src/core/mod.rs
// ============================================================================
// Module: Snapcheck Core Types
// Description: Canonical snapshot document and placeholder structures.
// Purpose: Provide stable, serializable types for recorded snapshot fixtures.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! Snapcheck core types define the recorded snapshot document: a mapping from
//! fully-qualified test identifiers to records of captured API responses.
//! These types are the canonical source of truth for any derived surfaces
//! (CLI, test harnesses, or fixture tooling).

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod digest;
pub mod document;
pub mod identifiers;
pub mod placeholder;
pub mod record;
pub mod time;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use digest::ContentDigest;
pub use digest::DigestAlgorithm;
pub use digest::DigestError;
pub use document::DocumentError;
pub use document::parse_document;
pub use document::to_document_bytes;
pub use identifiers::IdentifierError;
pub use identifiers::TestId;
pub use identifiers::TokenLabel;
pub use placeholder::Placeholder;
pub use placeholder::PlaceholderError;
pub use placeholder::Segment;
pub use placeholder::StringTemplate;
pub use record::RecordError;
pub use record::SnapshotDocument;
pub use record::SnapshotRecord;
pub use record::MAX_CONTENT_DEPTH;
pub use time::RecordedDate;
pub use time::RecordedDateError;
