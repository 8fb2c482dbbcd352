// crates/snapcheck-core/tests/placeholder.rs
// ============================================================================
// Module: Placeholder Grammar Tests
// Description: Verifies token parsing and recorded-string scanning.
// ============================================================================
//! ## Overview
//! Ensures the fixed token grammar accepts `<label>` / `<label:N>` forms,
//! rejects malformed candidates, and scans mixed strings into the expected
//! literal/token segments.

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

use snapcheck_core::Placeholder;
use snapcheck_core::PlaceholderError;
use snapcheck_core::Segment;
use snapcheck_core::StringTemplate;

#[test]
fn bare_token_parses() {
    let token: Placeholder = "<account-id>".parse().expect("token");
    assert_eq!(token.label.as_str(), "account-id");
    assert_eq!(token.ordinal, None);
    assert_eq!(token.to_string(), "<account-id>");
}

#[test]
fn ordinal_token_parses() {
    let token: Placeholder = "<domain-name:2>".parse().expect("token");
    assert_eq!(token.label.as_str(), "domain-name");
    assert_eq!(token.ordinal, Some(2));
    assert_eq!(token.to_string(), "<domain-name:2>");
}

#[test]
fn token_display_round_trips() {
    for text in ["<x>", "<snake_case>", "<label:1>", "<a-b-c:42>"] {
        let token: Placeholder = text.parse().expect("token");
        assert_eq!(token.to_string(), text);
    }
}

#[test]
fn zero_ordinal_is_rejected() {
    let err = "<label:0>".parse::<Placeholder>().unwrap_err();
    assert!(matches!(err, PlaceholderError::Ordinal { .. }));
}

#[test]
fn leading_zero_ordinal_is_rejected() {
    let err = "<label:01>".parse::<Placeholder>().unwrap_err();
    assert!(matches!(err, PlaceholderError::Ordinal { .. }));
}

#[test]
fn empty_label_is_rejected() {
    let err = "<>".parse::<Placeholder>().unwrap_err();
    assert!(matches!(err, PlaceholderError::Label(_)));
}

#[test]
fn label_with_space_is_rejected() {
    let err = "<two words>".parse::<Placeholder>().unwrap_err();
    assert!(matches!(err, PlaceholderError::Label(_)));
}

#[test]
fn missing_brackets_are_rejected() {
    let err = "account-id".parse::<Placeholder>().unwrap_err();
    assert!(matches!(err, PlaceholderError::Malformed { .. }));
}

#[test]
fn literal_string_scans_to_single_segment() {
    let template = StringTemplate::scan("OpenSearch_2.5").expect("scan");
    assert!(template.is_literal());
    assert_eq!(template.segments().len(), 1);
    assert!(template.as_whole_token().is_none());
}

#[test]
fn whole_token_string_scans_to_single_token() {
    let template = StringTemplate::scan("<domain-endpoint>").expect("scan");
    assert!(!template.is_literal());
    let token = template.as_whole_token().expect("whole token");
    assert_eq!(token.label.as_str(), "domain-endpoint");
}

#[test]
fn mixed_string_scans_to_alternating_segments() {
    let template =
        StringTemplate::scan("arn:<partition>:es:<region>:<account-id>:domain/<domain-name:1>")
            .expect("scan");
    assert!(template.as_whole_token().is_none());
    let segments = template.segments();
    assert!(matches!(&segments[0], Segment::Literal(text) if text == "arn:"));
    assert!(matches!(&segments[1], Segment::Token(token) if token.label.as_str() == "partition"));
    assert_eq!(template.tokens().count(), 4);
}

#[test]
fn unterminated_token_fails_scan() {
    let err = StringTemplate::scan("prefix <open and no close").unwrap_err();
    assert!(matches!(err, PlaceholderError::Unterminated { offset: 7 }));
}

#[test]
fn nested_open_bracket_fails_scan() {
    let err = StringTemplate::scan("<a<b>>").unwrap_err();
    assert!(matches!(err, PlaceholderError::Malformed { .. }));
}

#[test]
fn bare_close_bracket_is_literal() {
    let template = StringTemplate::scan("a > b").expect("scan");
    assert!(template.is_literal());
}

#[test]
fn segments_concatenate_back_to_source() {
    let source = "id-<account-id>-suffix";
    let template = StringTemplate::scan(source).expect("scan");
    let rebuilt: String = template
        .segments()
        .iter()
        .map(|segment| match segment {
            Segment::Literal(text) => text.clone(),
            Segment::Token(token) => token.to_string(),
        })
        .collect();
    assert_eq!(rebuilt, source);
}
