// crates/snapcheck-core/src/core/time.rs
// ============================================================================
// Module: Snapcheck Time Model
// Description: Human-readable capture timestamps for snapshot records.
// Purpose: Provide the stable recorded-date wire form across fixtures.
// Dependencies: serde, time
// ============================================================================

//! ## Overview
//! Every snapshot record carries the human-readable timestamp of its capture,
//! wire form `DD-MM-YYYY, HH:MM:SS`. The core never reads wall-clock time;
//! hosts supply capture instants explicitly so regeneration stays replayable
//! and tests stay deterministic.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;
use time::PrimitiveDateTime;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;

// ============================================================================
// SECTION: Wire Format
// ============================================================================

/// Wire format of a recorded date: `DD-MM-YYYY, HH:MM:SS`.
const RECORDED_DATE_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[day]-[month]-[year], [hour]:[minute]:[second]");

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised when parsing or rendering recorded dates.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RecordedDateError {
    /// The input did not match the recorded-date wire format.
    #[error("invalid recorded date {input:?}: expected DD-MM-YYYY, HH:MM:SS")]
    Parse {
        /// The rejected input text.
        input: String,
    },
}

// ============================================================================
// SECTION: Recorded Date
// ============================================================================

/// The capture timestamp of a snapshot record.
///
/// # Invariants
/// - Round-trips exactly: parsing a rendered value yields an equal value.
/// - Carries no zone offset; captures are stamped in the recorder's clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RecordedDate(PrimitiveDateTime);

impl RecordedDate {
    /// Creates a recorded date from an explicit capture instant.
    #[must_use]
    pub const fn from_datetime(datetime: PrimitiveDateTime) -> Self {
        Self(datetime)
    }

    /// Returns the underlying capture instant.
    #[must_use]
    pub const fn datetime(&self) -> PrimitiveDateTime {
        self.0
    }
}

impl fmt::Display for RecordedDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered = self.0.format(RECORDED_DATE_FORMAT).map_err(|_| fmt::Error)?;
        f.write_str(&rendered)
    }
}

impl FromStr for RecordedDate {
    type Err = RecordedDateError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        PrimitiveDateTime::parse(input, RECORDED_DATE_FORMAT)
            .map(Self)
            .map_err(|_| RecordedDateError::Parse {
                input: input.to_string(),
            })
    }
}

impl TryFrom<String> for RecordedDate {
    type Error = RecordedDateError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<RecordedDate> for String {
    fn from(value: RecordedDate) -> Self {
        value.to_string()
    }
}
