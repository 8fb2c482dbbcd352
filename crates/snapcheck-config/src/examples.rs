// crates/snapcheck-config/src/examples.rs
// ============================================================================
// Module: Snapcheck Config Examples
// Description: Deterministic example configuration text.
// Purpose: Keep documented config examples in lockstep with the model.
// Dependencies: crate::config
// ============================================================================

//! ## Overview
//! The example configuration is generated as a constant string and validated
//! by tests against the real model, so documentation can never drift from
//! what the loader accepts.

// ============================================================================
// SECTION: Example
// ============================================================================

/// Returns a complete, valid `snapcheck.toml` example.
#[must_use]
pub const fn config_toml_example() -> &'static str {
    concat!(
        "# Snapcheck configuration\n",
        "\n",
        "[fixture]\n",
        "# Committed golden fixture holding recorded snapshots.\n",
        "path = \"system-tests/tests/fixtures/search_domain.snapshot.json\"\n",
        "# Parsing refuses fixtures larger than this many bytes.\n",
        "max_bytes = 1048576\n",
        "# Parsing and matching refuse content nested deeper than this.\n",
        "max_content_depth = 64\n",
        "\n",
        "[verify]\n",
        "# Verification reports at most this many mismatches.\n",
        "max_mismatches = 256\n",
        "# When true, `record` overwrites existing records without --force.\n",
        "# SNAPCHECK_UPDATE=1 overrides this at run time.\n",
        "update = false\n",
    )
}
