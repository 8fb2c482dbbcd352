// crates/snapcheck-core/src/core/placeholder.rs
// ============================================================================
// Module: Snapcheck Placeholder Grammar
// Description: Placeholder token parsing and recorded-string templates.
// Purpose: Turn recorded string values into matchable literal/token segments.
// Dependencies: crate::core::identifiers, serde, thiserror
// ============================================================================

//! ## Overview
//! Recorded snapshots stand in for redacted or non-deterministic fields with
//! angle-bracket tokens: `<label>` names a semantic role, `<label:N>`
//! disambiguates repeated occurrences within one record. This module parses
//! the fixed token grammar and scans recorded strings into templates of
//! literal and token segments. Scanning is strict: a malformed candidate
//! token fails the whole string rather than degrading to a literal.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::core::identifiers::IdentifierError;
use crate::core::identifiers::TokenLabel;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised while parsing placeholder tokens or scanning templates.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlaceholderError {
    /// A token candidate was opened with `<` but never closed.
    #[error("unterminated placeholder token starting at byte {offset}")]
    Unterminated {
        /// Byte offset of the opening `<` within the scanned string.
        offset: usize,
    },
    /// The token label violated the label grammar.
    #[error("invalid placeholder label: {0}")]
    Label(#[from] IdentifierError),
    /// The ordinal suffix was not a positive base-10 integer.
    #[error("invalid placeholder ordinal {ordinal:?}")]
    Ordinal {
        /// The rejected ordinal text.
        ordinal: String,
    },
    /// The token body was empty or structurally malformed.
    #[error("malformed placeholder token {token:?}")]
    Malformed {
        /// The rejected token text, brackets included.
        token: String,
    },
}

// ============================================================================
// SECTION: Placeholder Tokens
// ============================================================================

/// A parsed placeholder token denoting a redacted or variable field.
///
/// # Invariants
/// - `label` satisfies the token-label grammar.
/// - `ordinal`, when present, is >= 1 and was written without leading zeros.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Placeholder {
    /// Semantic role of the redacted field.
    pub label: TokenLabel,
    /// Occurrence disambiguator within one record, when present.
    pub ordinal: Option<u32>,
}

impl Placeholder {
    /// Creates a placeholder from a label and optional ordinal.
    #[must_use]
    pub const fn new(label: TokenLabel, ordinal: Option<u32>) -> Self {
        Self {
            label,
            ordinal,
        }
    }
}

impl fmt::Display for Placeholder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.ordinal {
            Some(ordinal) => write!(f, "<{}:{}>", self.label, ordinal),
            None => write!(f, "<{}>", self.label),
        }
    }
}

impl FromStr for Placeholder {
    type Err = PlaceholderError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let Some(body) = token.strip_prefix('<').and_then(|rest| rest.strip_suffix('>')) else {
            return Err(PlaceholderError::Malformed {
                token: token.to_string(),
            });
        };
        parse_token_body(body)
    }
}

/// Parses the bracket-free token body `label` or `label:N`.
fn parse_token_body(body: &str) -> Result<Placeholder, PlaceholderError> {
    let (label_text, ordinal_text) = match body.split_once(':') {
        Some((label_text, ordinal_text)) => (label_text, Some(ordinal_text)),
        None => (body, None),
    };
    let label = TokenLabel::new(label_text)?;
    let ordinal = match ordinal_text {
        Some(text) => Some(parse_ordinal(text)?),
        None => None,
    };
    Ok(Placeholder::new(label, ordinal))
}

/// Parses a token ordinal: base-10, >= 1, no leading zeros.
fn parse_ordinal(text: &str) -> Result<u32, PlaceholderError> {
    let invalid = || PlaceholderError::Ordinal {
        ordinal: text.to_string(),
    };
    if text.is_empty() || text.starts_with('0') {
        return Err(invalid());
    }
    let ordinal: u32 = text.parse().map_err(|_| invalid())?;
    if ordinal == 0 {
        return Err(invalid());
    }
    Ok(ordinal)
}

// ============================================================================
// SECTION: String Templates
// ============================================================================

/// One scanned segment of a recorded string value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// A literal run that must match byte-for-byte.
    Literal(String),
    /// A placeholder token matched as a wildcard/capture slot.
    Token(Placeholder),
}

/// A recorded string scanned into literal and token segments.
///
/// # Invariants
/// - Segments concatenate back to the scanned source text.
/// - Adjacent literal segments are merged; no literal segment is empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringTemplate {
    /// Ordered literal/token segments covering the whole source string.
    segments: Vec<Segment>,
}

impl StringTemplate {
    /// Scans a recorded string into a template.
    ///
    /// Every `<` opens a token candidate that must close with `>` and
    /// satisfy the token grammar; tokens never nest. A bare `>` outside a
    /// candidate is a literal character.
    ///
    /// # Errors
    ///
    /// Returns [`PlaceholderError`] when a candidate token is unterminated
    /// or violates the grammar.
    pub fn scan(source: &str) -> Result<Self, PlaceholderError> {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut rest = source;
        let mut offset = 0;

        while let Some(open) = rest.find('<') {
            literal.push_str(&rest[..open]);
            let after_open = &rest[open + 1..];
            let Some(close) = after_open.find('>') else {
                return Err(PlaceholderError::Unterminated {
                    offset: offset + open,
                });
            };
            let token = scan_token(&after_open[..close])?;
            if !literal.is_empty() {
                segments.push(Segment::Literal(std::mem::take(&mut literal)));
            }
            segments.push(Segment::Token(token));
            offset += open + 1 + close + 1;
            rest = &after_open[close + 1..];
        }
        literal.push_str(rest);
        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }
        Ok(Self {
            segments,
        })
    }

    /// Returns the ordered segments of the template.
    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Reports whether the template contains no tokens.
    #[must_use]
    pub fn is_literal(&self) -> bool {
        self.segments.iter().all(|segment| matches!(segment, Segment::Literal(_)))
    }

    /// Returns the single token when the template is exactly one token.
    #[must_use]
    pub fn as_whole_token(&self) -> Option<&Placeholder> {
        match self.segments.as_slice() {
            [Segment::Token(token)] => Some(token),
            _ => None,
        }
    }

    /// Returns every token in the template, in order of appearance.
    pub fn tokens(&self) -> impl Iterator<Item = &Placeholder> {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Token(token) => Some(token),
            Segment::Literal(_) => None,
        })
    }
}

/// Parses a token body encountered during template scanning.
fn scan_token(body: &str) -> Result<Placeholder, PlaceholderError> {
    if body.contains('<') {
        return Err(PlaceholderError::Malformed {
            token: format!("<{body}>"),
        });
    }
    parse_token_body(body)
}
