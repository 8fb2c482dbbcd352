// system-tests/src/lib.rs
// ============================================================================
// Module: Snapcheck System Tests Library
// Description: Shared path helpers for system test scenarios.
// Purpose: Locate the committed golden fixture from test binaries.
// Dependencies: std
// ============================================================================

//! ## Overview
//! This crate hosts shared helpers used by the Snapcheck system-test
//! binaries in `system-tests/tests`. The committed golden fixture lives
//! under `tests/fixtures` and is located relative to this crate's manifest
//! so tests run from any working directory.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::PathBuf;

// ============================================================================
// SECTION: Paths
// ============================================================================

/// Relative location of the committed golden fixture.
const FIXTURE_RELATIVE_PATH: &str = "tests/fixtures/search_domain.snapshot.json";

/// Returns the absolute path of the committed golden fixture.
#[must_use]
pub fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join(FIXTURE_RELATIVE_PATH)
}
