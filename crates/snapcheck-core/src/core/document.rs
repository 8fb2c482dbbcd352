// crates/snapcheck-core/src/core/document.rs
// ============================================================================
// Module: Snapcheck Document Loader
// Description: Strict parsing and deterministic serialization of fixtures.
// Purpose: Fail closed on malformed, oversized, or duplicate-keyed input.
// Dependencies: crate::core::{identifiers, record, time}, serde, serde_json
// ============================================================================

//! ## Overview
//! The committed fixture file is untrusted input: it is hand-edited,
//! regenerated by tools, and merged like any other source file. Loading
//! therefore rejects oversized files, malformed JSON, duplicate keys at any
//! mapping level, and record shapes beyond the documented
//! `recorded-date` / `recorded-content` pair. Serialization is deterministic
//! so that re-serializing a parsed canonical fixture reproduces it byte for
//! byte.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::de;
use serde::de::MapAccess;
use serde::de::SeqAccess;
use serde::de::Visitor;
use serde_json::Map;
use serde_json::Number;
use serde_json::Value;
use thiserror::Error;

use crate::core::identifiers::IdentifierError;
use crate::core::identifiers::TestId;
use crate::core::record::RecordError;
use crate::core::record::SnapshotDocument;
use crate::core::record::SnapshotRecord;
use crate::core::time::RecordedDate;
use crate::core::time::RecordedDateError;

// ============================================================================
// SECTION: Record Fields
// ============================================================================

/// Wire name of the capture-date field.
const FIELD_RECORDED_DATE: &str = "recorded-date";
/// Wire name of the captured-content field.
const FIELD_RECORDED_CONTENT: &str = "recorded-content";

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised while loading or serializing snapshot documents.
#[derive(Debug, Error)]
pub enum DocumentError {
    /// The input exceeded the configured byte limit.
    #[error("fixture is {size} bytes (limit {limit})")]
    TooLarge {
        /// Observed input size in bytes.
        size: usize,
        /// Maximum permitted input size in bytes.
        limit: usize,
    },
    /// The input was not well-formed JSON or contained duplicate keys.
    #[error("failed to parse fixture: {0}")]
    Parse(String),
    /// The top level of the fixture was not a mapping.
    #[error("fixture top level must be a mapping of test identifiers")]
    TopLevelNotObject,
    /// A top-level key was not a valid test identifier.
    #[error("invalid test identifier {key:?}: {source}")]
    TestId {
        /// The rejected top-level key.
        key: String,
        /// Underlying identifier violation.
        source: IdentifierError,
    },
    /// A record value did not have the documented two-field shape.
    #[error("record for {test_id} must be {{\"recorded-date\", \"recorded-content\"}}; found key {key:?}")]
    UnknownRecordField {
        /// Identifier owning the malformed record.
        test_id: TestId,
        /// The unexpected record key.
        key: String,
    },
    /// A record was missing one of its two required fields.
    #[error("record for {test_id} is missing field {field:?}")]
    MissingRecordField {
        /// Identifier owning the malformed record.
        test_id: TestId,
        /// The missing field name.
        field: &'static str,
    },
    /// A record value was not a mapping.
    #[error("record for {test_id} must be a mapping")]
    RecordNotObject {
        /// Identifier owning the malformed record.
        test_id: TestId,
    },
    /// A capture date did not match the recorded-date wire format.
    #[error("record for {test_id}: {source}")]
    RecordedDate {
        /// Identifier owning the malformed record.
        test_id: TestId,
        /// Underlying date violation.
        source: RecordedDateError,
    },
    /// A record violated content invariants.
    #[error("record for {test_id}: {source}")]
    Record {
        /// Identifier owning the invalid record.
        test_id: TestId,
        /// Underlying record violation.
        source: RecordError,
    },
    /// The document could not be serialized.
    #[error("failed to serialize fixture: {0}")]
    Serialize(String),
}

// ============================================================================
// SECTION: Strict Value
// ============================================================================

/// A JSON value deserialized with duplicate-key rejection.
///
/// `serde_json::Value` keeps the last occurrence of a duplicated key, which
/// would silently mask fixture corruption. This wrapper walks the input with
/// its own visitor and fails on the first duplicate at any level.
struct StrictValue(Value);

impl<'de> Deserialize<'de> for StrictValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: de::Deserializer<'de>,
    {
        deserializer.deserialize_any(StrictValueVisitor)
    }
}

/// Visitor backing [`StrictValue`].
struct StrictValueVisitor;

impl<'de> Visitor<'de> for StrictValueVisitor {
    type Value = StrictValue;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("any JSON value without duplicate mapping keys")
    }

    fn visit_bool<E>(self, value: bool) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(StrictValue(Value::Bool(value)))
    }

    fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(StrictValue(Value::Number(Number::from(value))))
    }

    fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(StrictValue(Value::Number(Number::from(value))))
    }

    fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Number::from_f64(value)
            .map(|number| StrictValue(Value::Number(number)))
            .ok_or_else(|| E::custom("non-finite number"))
    }

    fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(StrictValue(Value::String(value.to_string())))
    }

    fn visit_string<E>(self, value: String) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(StrictValue(Value::String(value)))
    }

    fn visit_unit<E>(self) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(StrictValue(Value::Null))
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut items = Vec::new();
        while let Some(StrictValue(item)) = seq.next_element()? {
            items.push(item);
        }
        Ok(StrictValue(Value::Array(items)))
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut entries = Map::new();
        while let Some(key) = map.next_key::<String>()? {
            let StrictValue(value) = map.next_value()?;
            if entries.insert(key.clone(), value).is_some() {
                return Err(de::Error::custom(format!("duplicate key {key:?} in mapping")));
            }
        }
        Ok(StrictValue(Value::Object(entries)))
    }
}

// ============================================================================
// SECTION: Parsing
// ============================================================================

/// Parses fixture bytes into a validated snapshot document.
///
/// # Errors
///
/// Returns [`DocumentError`] when the input is oversized, malformed,
/// duplicate-keyed, mis-shaped, or violates record invariants.
pub fn parse_document(bytes: &[u8], max_bytes: usize) -> Result<SnapshotDocument, DocumentError> {
    if bytes.len() > max_bytes {
        return Err(DocumentError::TooLarge {
            size: bytes.len(),
            limit: max_bytes,
        });
    }
    let StrictValue(value) =
        serde_json::from_slice(bytes).map_err(|err| DocumentError::Parse(err.to_string()))?;
    document_from_value(value)
}

/// Converts a duplicate-checked JSON tree into a snapshot document.
fn document_from_value(value: Value) -> Result<SnapshotDocument, DocumentError> {
    let Value::Object(entries) = value else {
        return Err(DocumentError::TopLevelNotObject);
    };
    let mut document = SnapshotDocument::new();
    for (key, record_value) in entries {
        let test_id = TestId::new(key.clone()).map_err(|source| DocumentError::TestId {
            key,
            source,
        })?;
        let record = record_from_value(&test_id, record_value)?;
        document.insert(test_id, record);
    }
    Ok(document)
}

/// Converts one record value, enforcing the documented two-field shape.
fn record_from_value(test_id: &TestId, value: Value) -> Result<SnapshotRecord, DocumentError> {
    let Value::Object(fields) = value else {
        return Err(DocumentError::RecordNotObject {
            test_id: test_id.clone(),
        });
    };

    let mut recorded_date: Option<RecordedDate> = None;
    let mut recorded_content: Option<Value> = None;
    for (key, field_value) in fields {
        match key.as_str() {
            FIELD_RECORDED_DATE => {
                let Value::String(text) = field_value else {
                    return Err(DocumentError::RecordedDate {
                        test_id: test_id.clone(),
                        source: RecordedDateError::Parse {
                            input: field_value.to_string(),
                        },
                    });
                };
                let date = text.parse().map_err(|source| DocumentError::RecordedDate {
                    test_id: test_id.clone(),
                    source,
                })?;
                recorded_date = Some(date);
            }
            FIELD_RECORDED_CONTENT => {
                recorded_content = Some(field_value);
            }
            _ => {
                return Err(DocumentError::UnknownRecordField {
                    test_id: test_id.clone(),
                    key,
                });
            }
        }
    }

    let Some(recorded_date) = recorded_date else {
        return Err(DocumentError::MissingRecordField {
            test_id: test_id.clone(),
            field: FIELD_RECORDED_DATE,
        });
    };
    let Some(recorded_content) = recorded_content else {
        return Err(DocumentError::MissingRecordField {
            test_id: test_id.clone(),
            field: FIELD_RECORDED_CONTENT,
        });
    };

    SnapshotRecord::new(recorded_date, recorded_content).map_err(|source| DocumentError::Record {
        test_id: test_id.clone(),
        source,
    })
}

// ============================================================================
// SECTION: Serialization
// ============================================================================

/// Serializes a document deterministically: identifier-ordered top level,
/// fixed record field order (`recorded-date` then `recorded-content`),
/// key-ordered content mappings, two-space indentation, trailing newline.
///
/// Re-parsing the output yields an identical document, and serializing a
/// parsed canonical fixture reproduces the committed bytes.
///
/// # Errors
///
/// Returns [`DocumentError::Serialize`] when serialization fails.
pub fn to_document_bytes(document: &SnapshotDocument) -> Result<Vec<u8>, DocumentError> {
    let mut bytes = serde_json::to_vec_pretty(document)
        .map_err(|err| DocumentError::Serialize(err.to_string()))?;
    bytes.push(b'\n');
    Ok(bytes)
}
