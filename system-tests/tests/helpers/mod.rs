// system-tests/tests/helpers/mod.rs
// ============================================================================
// Module: System Test Helpers
// Description: Fixture loading and live-capture synthesis for system tests.
// Purpose: Share fixture access and token substitution across suites.
// Dependencies: snapcheck-core, serde_json
// ============================================================================

//! Shared helpers for Snapcheck system-tests.

#![allow(
    dead_code,
    reason = "Each test binary links the helpers it needs; the rest is unused."
)]

use std::collections::BTreeMap;
use std::fs;

use serde_json::Value;
use serde_json::json;
use snapcheck_core::Segment;
use snapcheck_core::SnapshotDocument;
use snapcheck_core::StringTemplate;
use snapcheck_core::TestId;
use snapcheck_core::parse_document;

/// Size limit applied when loading the committed fixture.
pub const FIXTURE_MAX_BYTES: usize = 1024 * 1024;

/// Reads the committed fixture bytes.
pub fn fixture_bytes() -> Vec<u8> {
    let path = system_tests::fixture_path();
    fs::read(&path).unwrap_or_else(|err| panic!("failed to read fixture at {}: {err}", path.display()))
}

/// Loads the committed fixture through the strict loader.
pub fn load_fixture() -> SnapshotDocument {
    parse_document(&fixture_bytes(), FIXTURE_MAX_BYTES)
        .unwrap_or_else(|err| panic!("committed fixture must parse: {err}"))
}

/// Identifier of the plain domain record.
pub fn test_domain_id() -> TestId {
    TestId::new("system_tests::search_domain::test_domain").unwrap_or_else(|err| panic!("{err}"))
}

/// Identifier of the alternative-types domain record.
pub fn alternative_types_id() -> TestId {
    TestId::new("system_tests::search_domain::test_domain_with_alternative_types")
        .unwrap_or_else(|err| panic!("{err}"))
}

/// Concrete substitutions for the tokens used in the committed fixture.
pub fn default_substitutions() -> BTreeMap<String, Value> {
    let mut map = BTreeMap::new();
    map.insert("<partition>".to_string(), json!("aws"));
    map.insert("<region>".to_string(), json!("eu-central-1"));
    map.insert("<account-id>".to_string(), json!("123456789012"));
    map.insert("<domain-name:1>".to_string(), json!("my-search-domain"));
    map.insert(
        "<domain-endpoint>".to_string(),
        json!("search-my-search-domain-abc123.eu-central-1.es.example.com"),
    );
    map.insert("<change-id>".to_string(), json!("7f3c2a10-90de-4c1b-a6e3-1f44b2c9d5aa"));
    map.insert("<change-started-at>".to_string(), json!("2026-08-06T14:09:02Z"));
    map.insert("<change-updated-at>".to_string(), json!("2026-08-06T14:10:55Z"));
    map.insert("<automated-update-date>".to_string(), json!("2026-09-01T00:00:00Z"));
    map
}

/// Synthesizes a live capture by substituting tokens in recorded content.
///
/// Whole-token strings take the mapped value verbatim; embedded tokens are
/// spliced in as text. Tokens without a mapping panic so fixtures and
/// substitutions cannot drift apart silently.
pub fn synthesize_live(recorded: &Value, substitutions: &BTreeMap<String, Value>) -> Value {
    match recorded {
        Value::String(text) => substitute_string(text, substitutions),
        Value::Array(items) => Value::Array(
            items.iter().map(|item| synthesize_live(item, substitutions)).collect(),
        ),
        Value::Object(entries) => Value::Object(
            entries
                .iter()
                .map(|(key, entry)| (key.clone(), synthesize_live(entry, substitutions)))
                .collect(),
        ),
        other => other.clone(),
    }
}

/// Substitutes tokens within one recorded string.
fn substitute_string(text: &str, substitutions: &BTreeMap<String, Value>) -> Value {
    let template = StringTemplate::scan(text)
        .unwrap_or_else(|err| panic!("fixture string {text:?} must scan: {err}"));
    if let Some(token) = template.as_whole_token() {
        let rendered = token.to_string();
        return substitutions
            .get(&rendered)
            .unwrap_or_else(|| panic!("no substitution for token {rendered}"))
            .clone();
    }
    if template.is_literal() {
        return Value::String(text.to_string());
    }
    let mut rebuilt = String::new();
    for segment in template.segments() {
        match segment {
            Segment::Literal(literal) => rebuilt.push_str(literal),
            Segment::Token(token) => {
                let rendered = token.to_string();
                let substitution = substitutions
                    .get(&rendered)
                    .unwrap_or_else(|| panic!("no substitution for token {rendered}"));
                let Value::String(substitution_text) = substitution else {
                    panic!("embedded token {rendered} needs a string substitution");
                };
                rebuilt.push_str(substitution_text);
            }
        }
    }
    Value::String(rebuilt)
}
