// crates/snapcheck-core/src/core/record.rs
// ============================================================================
// Module: Snapcheck Record Model
// Description: Snapshot records and the document mapping that holds them.
// Purpose: Provide validated, serializable snapshot fixture structures.
// Dependencies: crate::core::{identifiers, placeholder, time}, serde, serde_json
// ============================================================================

//! ## Overview
//! A snapshot document maps fully-qualified test identifiers to records. Each
//! record pairs the human-readable capture date with the captured API
//! responses, keyed by operation name and wrapped in their transport
//! envelopes. Records are validated at construction boundaries: content must
//! be a non-empty operation mapping, every string leaf must scan under the
//! placeholder grammar, and tree depth is bounded.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::core::identifiers::TestId;
use crate::core::placeholder::PlaceholderError;
use crate::core::placeholder::StringTemplate;
use crate::core::time::RecordedDate;

// ============================================================================
// SECTION: Limits
// ============================================================================

/// Maximum nesting depth of recorded content trees.
pub const MAX_CONTENT_DEPTH: usize = 64;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised when validating snapshot records.
#[derive(Debug, Error)]
pub enum RecordError {
    /// Recorded content was not a mapping of operation names to responses.
    #[error("recorded content must be a mapping of operation responses")]
    ContentNotObject,
    /// Recorded content contained no captured operations.
    #[error("recorded content must capture at least one operation")]
    ContentEmpty,
    /// Recorded content nested deeper than the permitted bound.
    #[error("recorded content exceeds depth limit {limit} at {path}")]
    DepthExceeded {
        /// Maximum permitted nesting depth.
        limit: usize,
        /// Dotted path of the offending subtree.
        path: String,
    },
    /// A recorded string leaf violated the placeholder grammar.
    #[error("invalid placeholder in string at {path}: {source}")]
    Placeholder {
        /// Dotted path of the offending string leaf.
        path: String,
        /// Underlying grammar violation.
        source: PlaceholderError,
    },
    /// A recorded numeric leaf was not a finite JSON number.
    #[error("non-finite number at {path}")]
    NonFiniteNumber {
        /// Dotted path of the offending numeric leaf.
        path: String,
    },
}

// ============================================================================
// SECTION: Snapshot Record
// ============================================================================

/// One recorded snapshot: capture date plus captured API responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SnapshotRecord {
    /// Human-readable capture timestamp.
    #[serde(rename = "recorded-date")]
    pub recorded_date: RecordedDate,
    /// Captured responses keyed by API operation name, envelopes included.
    #[serde(rename = "recorded-content")]
    pub recorded_content: Value,
}

impl SnapshotRecord {
    /// Creates a record after validating its content.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError`] when the content violates record invariants.
    pub fn new(recorded_date: RecordedDate, recorded_content: Value) -> Result<Self, RecordError> {
        validate_content(&recorded_content)?;
        Ok(Self {
            recorded_date,
            recorded_content,
        })
    }

    /// Validates record invariants over the recorded content.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError`] when the content is not a non-empty operation
    /// mapping, nests too deep, or carries malformed placeholders.
    pub fn validate(&self) -> Result<(), RecordError> {
        validate_content(&self.recorded_content)
    }
}

/// Validates recorded content against record invariants.
fn validate_content(content: &Value) -> Result<(), RecordError> {
    let Value::Object(operations) = content else {
        return Err(RecordError::ContentNotObject);
    };
    if operations.is_empty() {
        return Err(RecordError::ContentEmpty);
    }
    let mut path = Vec::new();
    for (operation, response) in operations {
        path.push(PathPart::Key(operation.clone()));
        validate_tree(response, &mut path, 1)?;
        path.pop();
    }
    Ok(())
}

/// One component of a validation path.
enum PathPart {
    /// Mapping key component.
    Key(String),
    /// Sequence index component.
    Index(usize),
}

/// Renders a validation path in dotted form with bracketed indices.
fn render_path(parts: &[PathPart]) -> String {
    let mut rendered = String::new();
    for part in parts {
        match part {
            PathPart::Key(key) => {
                if !rendered.is_empty() {
                    rendered.push('.');
                }
                rendered.push_str(key);
            }
            PathPart::Index(index) => {
                rendered.push('[');
                rendered.push_str(&index.to_string());
                rendered.push(']');
            }
        }
    }
    rendered
}

/// Walks a recorded subtree, enforcing depth, placeholder, and number rules.
fn validate_tree(value: &Value, path: &mut Vec<PathPart>, depth: usize) -> Result<(), RecordError> {
    if depth > MAX_CONTENT_DEPTH {
        return Err(RecordError::DepthExceeded {
            limit: MAX_CONTENT_DEPTH,
            path: render_path(path),
        });
    }
    match value {
        Value::String(text) => {
            StringTemplate::scan(text).map(|_| ()).map_err(|source| RecordError::Placeholder {
                path: render_path(path),
                source,
            })
        }
        Value::Number(number) => {
            if number.as_f64().is_some_and(f64::is_finite)
                || number.as_i64().is_some()
                || number.as_u64().is_some()
            {
                Ok(())
            } else {
                Err(RecordError::NonFiniteNumber {
                    path: render_path(path),
                })
            }
        }
        Value::Array(items) => {
            for (index, item) in items.iter().enumerate() {
                path.push(PathPart::Index(index));
                validate_tree(item, path, depth + 1)?;
                path.pop();
            }
            Ok(())
        }
        Value::Object(entries) => {
            for (key, entry) in entries {
                path.push(PathPart::Key(key.clone()));
                validate_tree(entry, path, depth + 1)?;
                path.pop();
            }
            Ok(())
        }
        Value::Null | Value::Bool(_) => Ok(()),
    }
}

// ============================================================================
// SECTION: Snapshot Document
// ============================================================================

/// The snapshot document: an ordered mapping of test identifiers to records.
///
/// # Invariants
/// - Keys are unique by construction; iteration order is deterministic.
/// - Inserting under an existing identifier is regeneration, not an error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SnapshotDocument {
    /// Records keyed by owning test identifier.
    records: BTreeMap<TestId, SnapshotRecord>,
}

impl SnapshotDocument {
    /// Creates an empty snapshot document.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the record for a test identifier, when present.
    #[must_use]
    pub fn get(&self, test_id: &TestId) -> Option<&SnapshotRecord> {
        self.records.get(test_id)
    }

    /// Inserts or overwrites a record, returning the replaced record.
    pub fn insert(&mut self, test_id: TestId, record: SnapshotRecord) -> Option<SnapshotRecord> {
        self.records.insert(test_id, record)
    }

    /// Removes the record for a test identifier, returning it when present.
    pub fn remove(&mut self, test_id: &TestId) -> Option<SnapshotRecord> {
        self.records.remove(test_id)
    }

    /// Returns the number of records in the document.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Reports whether the document holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterates records in identifier order.
    pub fn iter(&self) -> impl Iterator<Item = (&TestId, &SnapshotRecord)> {
        self.records.iter()
    }

    /// Validates every record in the document.
    ///
    /// # Errors
    ///
    /// Returns the first [`RecordError`] together with the owning identifier
    /// rendered into the error path by the caller.
    pub fn validate(&self) -> Result<(), (TestId, RecordError)> {
        for (test_id, record) in &self.records {
            if let Err(err) = record.validate() {
                return Err((test_id.clone(), err));
            }
        }
        Ok(())
    }
}
