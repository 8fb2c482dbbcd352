// crates/snapcheck-config/tests/update_mode.rs
// ============================================================================
// Module: Update Mode Tests
// Description: Validate golden-update switch resolution.
// Purpose: Ensure the update switch parses strictly and defers correctly.
// ============================================================================
//! Update-switch resolution tests for snapcheck-config.

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

use snapcheck_config::ConfigError;
use snapcheck_config::update_mode_from;

#[test]
fn absent_value_defers_to_config() {
    assert_eq!(update_mode_from(None).expect("absent"), None);
}

#[test]
fn enabled_value_parses() {
    assert_eq!(update_mode_from(Some("1")).expect("enabled"), Some(true));
}

#[test]
fn disabled_value_parses() {
    assert_eq!(update_mode_from(Some("0")).expect("disabled"), Some(false));
}

#[test]
fn other_values_are_rejected() {
    for value in ["true", "false", "yes", "no", "2", ""] {
        let err = update_mode_from(Some(value)).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }
}
