// crates/snapcheck-cli/src/i18n.rs
// ============================================================================
// Module: CLI Message Catalog
// Description: Provides message catalog and translation utilities for the CLI.
// Purpose: Centralize user-facing strings for consistent messaging.
// Dependencies: Standard library collections and formatting utilities.
// ============================================================================

//! ## Overview
//! The Snapcheck CLI stores user-facing strings in a small translation
//! catalog to enforce consistent messaging. All runtime output should be
//! routed through the [`t!`](crate::t) macro.
//!
//! ## Invariants
//! - The catalog is initialized once and read-only thereafter.
//! - Missing keys fall back to the key itself to avoid panics.
//! - Placeholder substitutions preserve deterministic order.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::HashMap;
use std::sync::OnceLock;

// ============================================================================
// SECTION: Types
// ============================================================================

/// A formatted message argument captured by the [`macro@crate::t`] macro.
#[derive(Clone)]
pub struct MessageArg {
    /// The placeholder name used in message templates (e.g., `"path"`).
    pub key: &'static str,
    /// The formatted string value to substitute for this placeholder.
    pub value: String,
}

impl MessageArg {
    /// Constructs a new [`MessageArg`] from a key and displayable value.
    pub fn new(key: &'static str, value: impl Into<String>) -> Self {
        Self {
            key,
            value: value.into(),
        }
    }
}

// ============================================================================
// SECTION: Catalog
// ============================================================================

/// Static catalog entries loaded into the message bundle.
const CATALOG_ITEMS: &[(&str, &str)] = &[
    ("main.version", "snapcheck {version}"),
    ("output.stream.stdout", "stdout"),
    ("output.stream.stderr", "stderr"),
    ("output.stream.unknown", "output"),
    ("output.write_failed", "Failed to write to {stream}: {error}"),
    ("config.load_failed", "Failed to load config: {error}"),
    ("fixture.load_failed", "Failed to load fixture at {path}: {error}"),
    ("fixture.missing", "No fixture found at {path}; record a snapshot first."),
    ("fixture.save_failed", "Failed to save fixture at {path}: {error}"),
    ("live.read_failed", "Failed to read live capture at {path}: {error}"),
    ("live.too_large", "Refusing to read live capture at {path}: {size} bytes (limit {limit})."),
    ("live.parse_failed", "Failed to parse live capture JSON at {path}: {error}"),
    ("validate.ok", "Fixture valid: {count} record(s) at {path}."),
    (
        "validate.not_canonical",
        "Fixture at {path} parses but is not in canonical form; re-serialize it with `snapcheck \
         record` or rewrite it canonically.",
    ),
    ("validate.roundtrip_failed", "Fixture at {path} does not round-trip: {error}"),
    ("record.lookup_failed", "No record found for test identifier {test_id}."),
    ("record.invalid_test_id", "Invalid test identifier {test_id}: {error}"),
    ("show.date", "{date}"),
    ("verify.run_failed", "Verification aborted: {error}"),
    ("verify.pass", "Verification passed for {test_id} (content digest {digest})."),
    ("verify.fail.header", "Verification failed for {test_id}:"),
    ("verify.fail.mismatch", "  {path}: {detail}"),
    ("verify.fail.truncated", "  (mismatch list truncated; raise verify.max_mismatches to see more)"),
    ("verify.detail.value", "recorded {recorded}, live {live}"),
    ("verify.detail.missing_key", "live output is missing key {key}"),
    ("verify.detail.unexpected_key", "live output has unexpected key {key}"),
    ("verify.detail.length", "recorded sequence has {recorded} item(s), live has {live}"),
    ("verify.detail.template", "live value {live} does not satisfy template {template}"),
    (
        "verify.detail.binding",
        "token {token} already captured {bound} but live value is {live}",
    ),
    ("record.created", "Recorded new snapshot for {test_id} at {path}."),
    ("record.replaced", "Regenerated snapshot for {test_id} at {path}."),
    (
        "record.refused",
        "Refusing to overwrite existing record for {test_id}; pass --force or set {env}=1.",
    ),
    ("record.content_invalid", "Captured content is invalid: {error}"),
];

// ============================================================================
// SECTION: Translation
// ============================================================================

/// Translates `key` using the catalog while substituting `args`.
#[must_use]
pub fn translate(key: &str, args: Vec<MessageArg>) -> String {
    let template = catalog().get(key).copied().unwrap_or(key);
    if args.is_empty() {
        return template.to_string();
    }

    let mut result = template.to_string();
    for arg in args {
        let placeholder = format!("{{{}}}", arg.key);
        result = result.replace(&placeholder, &arg.value);
    }
    result
}

/// Returns the static catalog used by the CLI.
fn catalog() -> &'static HashMap<&'static str, &'static str> {
    static CATALOG: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();

    CATALOG.get_or_init(|| CATALOG_ITEMS.iter().copied().collect())
}

// ============================================================================
// SECTION: Macro
// ============================================================================

/// Formats a catalog message from a key and named arguments.
///
/// # Arguments
///
/// - `$key` must match a catalog entry.
/// - Named arguments are substituted into `{placeholder}` positions.
///
/// # Returns
///
/// A formatted [`String`] with placeholders substituted.
#[macro_export]
macro_rules! t {
    ($key:literal $(, $name:ident = $value:expr )* $(,)?) => {{
        let args = ::std::vec![
            $(
                $crate::i18n::MessageArg::new(stringify!($name), $value.to_string()),
            )*
        ];
        $crate::i18n::translate($key, args)
    }};
}
