// crates/snapcheck-core/src/runtime/matcher.rs
// ============================================================================
// Module: Snapcheck Matcher Logic
// Description: Placeholder-aware structural comparison of recorded content.
// Purpose: Compare stored snapshots against live captures, tokens as slots.
// Dependencies: crate::core, bigdecimal, serde_json
// ============================================================================

//! ## Overview
//! The matcher applies deep structural equality between recorded content and
//! a live capture, treating placeholder tokens as wildcards/capture slots
//! rather than literals. Numeric comparison is decimal-aware so a recorded
//! `2` matches a live `2.0`. Every occurrence of the same token within one
//! run must capture structurally equal values; ordinals exist to separate
//! occurrences that legitimately differ. Mismatches are reported with dotted
//! paths and the report is size-capped against adversarial inputs.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::str::FromStr;

use bigdecimal::BigDecimal;
use serde::Serialize;
use serde_json::Number;
use serde_json::Value;
use thiserror::Error;

use crate::core::placeholder::PlaceholderError;
use crate::core::placeholder::Segment;
use crate::core::placeholder::StringTemplate;
use crate::core::record::MAX_CONTENT_DEPTH;

// ============================================================================
// SECTION: Limits
// ============================================================================

/// Default cap on reported mismatches per run.
const DEFAULT_MAX_MISMATCHES: usize = 256;

/// Limits applied to one matching run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchLimits {
    /// Maximum number of mismatches collected before truncating.
    pub max_mismatches: usize,
    /// Maximum recorded-content depth the matcher will walk.
    pub max_depth: usize,
}

impl Default for MatchLimits {
    fn default() -> Self {
        Self {
            max_mismatches: DEFAULT_MAX_MISMATCHES,
            max_depth: MAX_CONTENT_DEPTH,
        }
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors that abort a matching run instead of producing a report.
#[derive(Debug, Error)]
pub enum MatchError {
    /// A recorded string leaf violated the placeholder grammar.
    #[error("invalid placeholder in recorded string at {path}: {source}")]
    Template {
        /// Dotted path of the offending recorded string.
        path: String,
        /// Underlying grammar violation.
        source: PlaceholderError,
    },
    /// The recorded content nested deeper than the configured bound.
    #[error("recorded content exceeds depth limit {limit} at {path}")]
    DepthExceeded {
        /// Maximum permitted nesting depth.
        limit: usize,
        /// Dotted path of the offending subtree.
        path: String,
    },
}

// ============================================================================
// SECTION: Value Paths
// ============================================================================

/// One component of a value path.
#[derive(Debug, Clone, PartialEq, Eq)]
enum PathSegment {
    /// Mapping key component.
    Key(String),
    /// Sequence index component.
    Index(usize),
}

/// Location of a value within recorded content, rendered dotted with
/// bracketed indices (`describe_domain.DomainStatus.EngineVersion`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValuePath {
    /// Ordered path components from the content root.
    segments: Vec<PathSegment>,
}

impl ValuePath {
    /// Returns the path of the content root.
    #[must_use]
    pub fn root() -> Self {
        Self::default()
    }

    /// Reports whether this is the content root.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }
}

impl fmt::Display for ValuePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            return f.write_str("$");
        }
        let mut first = true;
        for segment in &self.segments {
            match segment {
                PathSegment::Key(key) => {
                    if !first {
                        f.write_str(".")?;
                    }
                    f.write_str(key)?;
                }
                PathSegment::Index(index) => {
                    write!(f, "[{index}]")?;
                }
            }
            first = false;
        }
        Ok(())
    }
}

impl Serialize for ValuePath {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

// ============================================================================
// SECTION: Mismatches
// ============================================================================

/// The reason one location failed to match.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum MismatchKind {
    /// Recorded and live values differ (type or literal value).
    ValueMismatch {
        /// The recorded expectation.
        recorded: Value,
        /// The live value observed.
        live: Value,
    },
    /// A recorded key was absent from the live mapping.
    MissingKey {
        /// The absent mapping key.
        key: String,
    },
    /// The live mapping carried a key the record does not expect.
    UnexpectedKey {
        /// The unexpected mapping key.
        key: String,
    },
    /// Recorded and live sequences have different lengths.
    LengthMismatch {
        /// Recorded sequence length.
        recorded: usize,
        /// Live sequence length.
        live: usize,
    },
    /// A live string did not satisfy a token-bearing recorded template.
    TemplateMismatch {
        /// The recorded template text, tokens included.
        template: String,
        /// The live string observed.
        live: Value,
    },
    /// A token occurrence captured a value conflicting with its binding.
    BindingConflict {
        /// The token text, brackets included.
        token: String,
        /// The value the token was already bound to.
        bound: Value,
        /// The conflicting live value.
        live: Value,
    },
}

/// One reported mismatch: a location and its reason.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Mismatch {
    /// Location of the mismatch within the recorded content.
    pub path: ValuePath,
    /// Reason the location failed to match.
    pub kind: MismatchKind,
}

// ============================================================================
// SECTION: Bindings
// ============================================================================

/// Token captures accumulated over one matching run.
///
/// # Invariants
/// - Keyed by rendered token text (`<label>` / `<label:N>`).
/// - A token binds once; later occurrences must capture an equal value.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Bindings {
    /// Captured values keyed by token text.
    captured: std::collections::BTreeMap<String, Value>,
}

impl Bindings {
    /// Creates an empty binding set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the value bound to a token, when present.
    #[must_use]
    pub fn get(&self, token: &str) -> Option<&Value> {
        self.captured.get(token)
    }

    /// Binds a token to a captured value.
    fn bind(&mut self, token: String, value: Value) {
        self.captured.insert(token, value);
    }

    /// Removes a binding during backtracking.
    fn unbind(&mut self, token: &str) {
        self.captured.remove(token);
    }

    /// Returns the number of bound tokens.
    #[must_use]
    pub fn len(&self) -> usize {
        self.captured.len()
    }

    /// Reports whether no tokens are bound.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.captured.is_empty()
    }
}

// ============================================================================
// SECTION: Match Report
// ============================================================================

/// Outcome of one matching run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MatchReport {
    /// Mismatches found, in recorded-content walk order.
    pub mismatches: Vec<Mismatch>,
    /// Whether the mismatch list was truncated at the configured cap.
    pub truncated: bool,
    /// Token captures accumulated while matching.
    pub bindings: Bindings,
}

impl MatchReport {
    /// Reports whether the live capture matched the recorded content.
    #[must_use]
    pub fn is_match(&self) -> bool {
        self.mismatches.is_empty() && !self.truncated
    }
}

// ============================================================================
// SECTION: Matching
// ============================================================================

/// Compares recorded content against a live capture.
///
/// # Errors
///
/// Returns [`MatchError`] when the recorded side carries malformed
/// placeholders or nests beyond the depth limit. Live-side differences are
/// never errors; they are reported as mismatches.
pub fn match_content(
    recorded: &Value,
    live: &Value,
    limits: &MatchLimits,
) -> Result<MatchReport, MatchError> {
    let mut run = MatchRun {
        limits: *limits,
        report: MatchReport::default(),
        path: Vec::new(),
    };
    run.match_value(recorded, live, 0)?;
    Ok(run.report)
}

/// Mutable state of one matching run.
struct MatchRun {
    /// Limits applied to this run.
    limits: MatchLimits,
    /// Report under construction.
    report: MatchReport,
    /// Current location within the recorded content.
    path: Vec<PathSegment>,
}

impl MatchRun {
    /// Records a mismatch at the current path, honoring the report cap.
    fn push_mismatch(&mut self, kind: MismatchKind) {
        if self.report.mismatches.len() >= self.limits.max_mismatches {
            self.report.truncated = true;
            return;
        }
        self.report.mismatches.push(Mismatch {
            path: ValuePath {
                segments: self.path.clone(),
            },
            kind,
        });
    }

    /// Reports whether the run should stop collecting mismatches.
    fn saturated(&self) -> bool {
        self.report.truncated
    }

    /// Renders the current path for error construction.
    fn rendered_path(&self) -> String {
        ValuePath {
            segments: self.path.clone(),
        }
        .to_string()
    }

    /// Compares one recorded value against its live counterpart.
    fn match_value(&mut self, recorded: &Value, live: &Value, depth: usize) -> Result<(), MatchError> {
        if depth > self.limits.max_depth {
            return Err(MatchError::DepthExceeded {
                limit: self.limits.max_depth,
                path: self.rendered_path(),
            });
        }
        if self.saturated() {
            return Ok(());
        }
        match recorded {
            Value::String(text) => self.match_string(text, live),
            Value::Number(recorded_number) => {
                let matched = match live {
                    Value::Number(live_number) => numbers_equal(recorded_number, live_number),
                    _ => false,
                };
                if !matched {
                    self.push_mismatch(MismatchKind::ValueMismatch {
                        recorded: recorded.clone(),
                        live: live.clone(),
                    });
                }
                Ok(())
            }
            Value::Array(recorded_items) => self.match_array(recorded, recorded_items, live, depth),
            Value::Object(recorded_entries) => {
                self.match_object(recorded, recorded_entries, live, depth)
            }
            Value::Null | Value::Bool(_) => {
                if recorded != live {
                    self.push_mismatch(MismatchKind::ValueMismatch {
                        recorded: recorded.clone(),
                        live: live.clone(),
                    });
                }
                Ok(())
            }
        }
    }

    /// Compares a recorded string leaf, applying the template rules.
    fn match_string(&mut self, text: &str, live: &Value) -> Result<(), MatchError> {
        let template = StringTemplate::scan(text).map_err(|source| MatchError::Template {
            path: self.rendered_path(),
            source,
        })?;

        if let Some(token) = template.as_whole_token() {
            let token_text = token.to_string();
            match self.report.bindings.get(&token_text).cloned() {
                Some(bound) => {
                    if bound != *live {
                        self.push_mismatch(MismatchKind::BindingConflict {
                            token: token_text,
                            bound,
                            live: live.clone(),
                        });
                    }
                }
                None => self.report.bindings.bind(token_text, live.clone()),
            }
            return Ok(());
        }

        if template.is_literal() {
            let matched = matches!(live, Value::String(live_text) if live_text == text);
            if !matched {
                self.push_mismatch(MismatchKind::ValueMismatch {
                    recorded: Value::String(text.to_string()),
                    live: live.clone(),
                });
            }
            return Ok(());
        }

        let Value::String(live_text) = live else {
            self.push_mismatch(MismatchKind::TemplateMismatch {
                template: text.to_string(),
                live: live.clone(),
            });
            return Ok(());
        };
        if !match_segments(template.segments(), live_text, &mut self.report.bindings) {
            self.push_mismatch(MismatchKind::TemplateMismatch {
                template: text.to_string(),
                live: live.clone(),
            });
        }
        Ok(())
    }

    /// Compares recorded and live sequences element-wise, in order.
    fn match_array(
        &mut self,
        recorded: &Value,
        recorded_items: &[Value],
        live: &Value,
        depth: usize,
    ) -> Result<(), MatchError> {
        let Value::Array(live_items) = live else {
            self.push_mismatch(MismatchKind::ValueMismatch {
                recorded: recorded.clone(),
                live: live.clone(),
            });
            return Ok(());
        };
        if recorded_items.len() != live_items.len() {
            self.push_mismatch(MismatchKind::LengthMismatch {
                recorded: recorded_items.len(),
                live: live_items.len(),
            });
            return Ok(());
        }
        for (index, (recorded_item, live_item)) in
            recorded_items.iter().zip(live_items).enumerate()
        {
            self.path.push(PathSegment::Index(index));
            let result = self.match_value(recorded_item, live_item, depth + 1);
            self.path.pop();
            result?;
        }
        Ok(())
    }

    /// Compares recorded and live mappings: key sets first, then values.
    fn match_object(
        &mut self,
        recorded: &Value,
        recorded_entries: &serde_json::Map<String, Value>,
        live: &Value,
        depth: usize,
    ) -> Result<(), MatchError> {
        let Value::Object(live_entries) = live else {
            self.push_mismatch(MismatchKind::ValueMismatch {
                recorded: recorded.clone(),
                live: live.clone(),
            });
            return Ok(());
        };
        for key in recorded_entries.keys() {
            if !live_entries.contains_key(key) {
                self.push_mismatch(MismatchKind::MissingKey {
                    key: key.clone(),
                });
            }
        }
        for key in live_entries.keys() {
            if !recorded_entries.contains_key(key) {
                self.push_mismatch(MismatchKind::UnexpectedKey {
                    key: key.clone(),
                });
            }
        }
        for (key, recorded_entry) in recorded_entries {
            let Some(live_entry) = live_entries.get(key) else {
                continue;
            };
            self.path.push(PathSegment::Key(key.clone()));
            let result = self.match_value(recorded_entry, live_entry, depth + 1);
            self.path.pop();
            result?;
        }
        Ok(())
    }
}

// ============================================================================
// SECTION: Template Matching
// ============================================================================

/// Matches template segments against a live string with backtracking.
///
/// Unbound tokens capture the shortest non-empty substring that lets the
/// remaining segments match, so results are deterministic (leftmost-shortest).
/// Bound tokens behave as literals carrying their captured text.
fn match_segments(segments: &[Segment], live: &str, bindings: &mut Bindings) -> bool {
    let Some((segment, rest)) = segments.split_first() else {
        return live.is_empty();
    };
    match segment {
        Segment::Literal(literal) => live
            .strip_prefix(literal.as_str())
            .is_some_and(|remaining| match_segments(rest, remaining, bindings)),
        Segment::Token(token) => {
            let token_text = token.to_string();
            if let Some(bound) = bindings.get(&token_text) {
                let Value::String(bound_text) = bound else {
                    return false;
                };
                let bound_text = bound_text.clone();
                return live
                    .strip_prefix(bound_text.as_str())
                    .is_some_and(|remaining| match_segments(rest, remaining, bindings));
            }
            for split in 1..=live.len() {
                if !live.is_char_boundary(split) {
                    continue;
                }
                let (captured, remaining) = live.split_at(split);
                bindings.bind(token_text.clone(), Value::String(captured.to_string()));
                if match_segments(rest, remaining, bindings) {
                    return true;
                }
                bindings.unbind(&token_text);
            }
            false
        }
    }
}

// ============================================================================
// SECTION: Numeric Equality
// ============================================================================

/// Compares JSON numbers with decimal-aware equality.
fn numbers_equal(left: &Number, right: &Number) -> bool {
    if left == right {
        return true;
    }
    let (Ok(left), Ok(right)) = (
        BigDecimal::from_str(&left.to_string()),
        BigDecimal::from_str(&right.to_string()),
    ) else {
        return false;
    };
    left == right
}
