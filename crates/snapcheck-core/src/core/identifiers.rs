// crates/snapcheck-core/src/core/identifiers.rs
// ============================================================================
// Module: Snapcheck Identifiers
// Description: Canonical opaque identifiers for snapshot records and tokens.
// Purpose: Provide strongly typed, serializable identifiers with stable wire forms.
// Dependencies: serde, thiserror
// ============================================================================

//! ## Overview
//! This module defines the identifiers used throughout Snapcheck. Test
//! identifiers are opaque strings naming the test that owns a record;
//! token labels name the semantic role of a redacted field. Both enforce
//! their invariants at construction boundaries and serialize transparently
//! as strings.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: Limits
// ============================================================================

/// Maximum byte length of a fully-qualified test identifier.
const MAX_TEST_ID_LENGTH: usize = 512;
/// Maximum byte length of a placeholder token label.
const MAX_TOKEN_LABEL_LENGTH: usize = 64;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised when constructing identifiers from untrusted input.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum IdentifierError {
    /// The identifier was empty.
    #[error("{kind} must not be empty")]
    Empty {
        /// Identifier kind for error context.
        kind: &'static str,
    },
    /// The identifier exceeded its length bound.
    #[error("{kind} exceeds {limit} bytes")]
    TooLong {
        /// Identifier kind for error context.
        kind: &'static str,
        /// Maximum permitted byte length.
        limit: usize,
    },
    /// The identifier contained a forbidden character.
    #[error("{kind} contains forbidden character {character:?}")]
    ForbiddenCharacter {
        /// Identifier kind for error context.
        kind: &'static str,
        /// The first offending character.
        character: char,
    },
}

// ============================================================================
// SECTION: Test Identifiers
// ============================================================================

/// Fully-qualified identifier of the test that owns a snapshot record.
///
/// # Invariants
/// - Non-empty, at most [`MAX_TEST_ID_LENGTH`] bytes.
/// - No whitespace or control characters; foreign identifier shapes
///   (module paths, runner node ids) remain representable.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TestId(String);

impl TestId {
    /// Creates a new test identifier, validating its invariants.
    ///
    /// # Errors
    ///
    /// Returns [`IdentifierError`] when the identifier is empty, too long,
    /// or contains whitespace or control characters.
    pub fn new(id: impl Into<String>) -> Result<Self, IdentifierError> {
        let id = id.into();
        if id.is_empty() {
            return Err(IdentifierError::Empty {
                kind: "test identifier",
            });
        }
        if id.len() > MAX_TEST_ID_LENGTH {
            return Err(IdentifierError::TooLong {
                kind: "test identifier",
                limit: MAX_TEST_ID_LENGTH,
            });
        }
        if let Some(character) = id.chars().find(|ch| ch.is_whitespace() || ch.is_control()) {
            return Err(IdentifierError::ForbiddenCharacter {
                kind: "test identifier",
                character,
            });
        }
        Ok(Self(id))
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Reports whether the identifier's trailing segment equals `segment`.
    ///
    /// Segments are delimited by `::`, `.`, or `/` so both Rust-style module
    /// paths and foreign runner identifiers select the same way.
    #[must_use]
    pub fn ends_with_segment(&self, segment: &str) -> bool {
        self.0
            .rsplit([':', '.', '/'])
            .next()
            .is_some_and(|tail| tail == segment)
    }
}

impl fmt::Display for TestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl TryFrom<String> for TestId {
    type Error = IdentifierError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TestId> for String {
    fn from(value: TestId) -> Self {
        value.0
    }
}

// ============================================================================
// SECTION: Token Labels
// ============================================================================

/// Semantic label of a placeholder token (e.g. `account-id`).
///
/// # Invariants
/// - Non-empty, at most [`MAX_TOKEN_LABEL_LENGTH`] bytes.
/// - Restricted to ASCII alphanumerics, `_`, and `-`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TokenLabel(String);

impl TokenLabel {
    /// Creates a new token label, validating its invariants.
    ///
    /// # Errors
    ///
    /// Returns [`IdentifierError`] when the label is empty, too long, or
    /// contains characters outside `[A-Za-z0-9_-]`.
    pub fn new(label: impl Into<String>) -> Result<Self, IdentifierError> {
        let label = label.into();
        if label.is_empty() {
            return Err(IdentifierError::Empty {
                kind: "token label",
            });
        }
        if label.len() > MAX_TOKEN_LABEL_LENGTH {
            return Err(IdentifierError::TooLong {
                kind: "token label",
                limit: MAX_TOKEN_LABEL_LENGTH,
            });
        }
        if let Some(character) = label
            .chars()
            .find(|ch| !(ch.is_ascii_alphanumeric() || *ch == '_' || *ch == '-'))
        {
            return Err(IdentifierError::ForbiddenCharacter {
                kind: "token label",
                character,
            });
        }
        Ok(Self(label))
    }

    /// Returns the label as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TokenLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl TryFrom<String> for TokenLabel {
    type Error = IdentifierError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TokenLabel> for String {
    fn from(value: TokenLabel) -> Self {
        value.0
    }
}
