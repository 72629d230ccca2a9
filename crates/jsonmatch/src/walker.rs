//! The diff walker: compares an expectation tree against a parsed payload.
//!
//! Traversal order is driven by the actual document. Array indices are
//! visited in ascending order. Object keys are visited in the order they
//! appear in the payload text, and keys that only the expectation declares
//! are reported afterwards, in declaration order. For a fixed expectation
//! and payload text the output is therefore reproducible byte for byte.
//!
//! The walk never stops at the first mismatch, except that it does not
//! descend below a node whose JSON-level types disagree.

use crate::diff::{Diff, DiffKind, MISSING};
use crate::encoder::{canonical_json, Encoded};
use crate::error::{MatchError, Result};
use crate::expected::Expected;
use crate::parser::{lossy_text, parse_payload, JsonType};
use crate::pointer::Pointer;
use indexmap::IndexMap;
use serde_json::{Map, Value};
use tracing::debug;

impl Expected<'_> {
    /// Compare this expectation against a raw JSON payload.
    ///
    /// Returns every discrepancy in walk order; an empty vector means the
    /// payload matches. A payload that is not valid JSON yields exactly one
    /// diff of kind [`DiffKind::UnmarshalError`] at the root.
    pub fn diff_against(&self, payload: &[u8]) -> Vec<Diff> {
        match parse_payload(payload) {
            Ok(actual) => self.diff_against_value(&actual),
            Err(err) => {
                debug!(error = %err, len = payload.len(), "payload is not valid JSON");
                vec![Diff {
                    kind: DiffKind::UnmarshalError(err.to_string()),
                    pointer: String::new(),
                    expected_json: self.canonical_json(),
                    actual_json: lossy_text(payload).into_owned(),
                }]
            }
        }
    }

    /// Compare this expectation against an already parsed value.
    ///
    /// Object key order of `actual` drives the diff order, so parse it with
    /// `preserve_order` semantics (as [`parse_payload`] does).
    pub fn diff_against_value(&self, actual: &Value) -> Vec<Diff> {
        let mut diffs = Vec::new();
        compare(self, actual, &Pointer::root(), &mut diffs);
        debug!(diffs = diffs.len(), "compared payload against expectation");
        diffs
    }

    /// Like [`diff_against`](Self::diff_against), but folds the diffs into a
    /// `Result` for use with `?`.
    pub fn ensure_matches(&self, payload: &[u8]) -> Result<()> {
        let diffs = self.diff_against(payload);
        if diffs.is_empty() {
            Ok(())
        } else {
            Err(MatchError::Mismatch(diffs))
        }
    }

    /// Panic with a line-per-diff report unless `payload` matches.
    #[track_caller]
    pub fn assert_matches(&self, payload: &[u8]) {
        if let Err(err) = self.ensure_matches(payload) {
            panic!("{err}");
        }
    }
}

fn compare(expected: &Expected<'_>, actual: &Value, at: &Pointer, diffs: &mut Vec<Diff>) {
    match (expected, actual) {
        (Expected::Capture(capture), _) => capture.resolve(actual, at, diffs),
        // The truth cannot be established, so this never matches anything.
        (Expected::Opaque(Encoded::NotMarshalable(placeholder)), _) => {
            diffs.push(mismatch(
                DiffKind::TypeMismatch,
                at,
                placeholder.clone(),
                canonical_json(actual),
            ));
        }
        (Expected::Null, Value::Null) => {}
        (Expected::Scalar(scalar), _) if scalar.json_type() == JsonType::of(actual) => {
            if !scalar.matches(actual) {
                diffs.push(value_mismatch(expected, actual, at));
            }
        }
        (Expected::Array(items), Value::Array(actual_items)) => {
            compare_arrays(items, actual_items, at, diffs);
        }
        (Expected::Object(fields), Value::Object(actual_fields)) => {
            compare_objects(fields, actual_fields, at, diffs);
        }
        (Expected::Opaque(Encoded::Json(value)), _)
            if JsonType::of(value) == JsonType::of(actual) =>
        {
            if value != actual {
                diffs.push(value_mismatch(expected, actual, at));
            }
        }
        _ => diffs.push(mismatch(
            DiffKind::TypeMismatch,
            at,
            expected.canonical_json(),
            canonical_json(actual),
        )),
    }
}

fn compare_arrays(
    items: &[Expected<'_>],
    actual_items: &[Value],
    at: &Pointer,
    diffs: &mut Vec<Diff>,
) {
    for (index, actual_item) in actual_items.iter().enumerate() {
        let at = at.index(index);
        match items.get(index) {
            Some(item) => compare(item, actual_item, &at, diffs),
            None => diffs.push(unexpected(actual_item, &at)),
        }
    }
    for (index, item) in items.iter().enumerate().skip(actual_items.len()) {
        diffs.push(absent(item, &at.index(index)));
    }
}

fn compare_objects(
    fields: &IndexMap<String, Expected<'_>>,
    actual_fields: &Map<String, Value>,
    at: &Pointer,
    diffs: &mut Vec<Diff>,
) {
    for (key, actual_value) in actual_fields {
        let at = at.key(key);
        match fields.get(key) {
            Some(field) => compare(field, actual_value, &at, diffs),
            None => diffs.push(unexpected(actual_value, &at)),
        }
    }
    for (key, field) in fields {
        if !actual_fields.contains_key(key) {
            diffs.push(absent(field, &at.key(key)));
        }
    }
}

fn mismatch(kind: DiffKind, at: &Pointer, expected_json: String, actual_json: String) -> Diff {
    Diff {
        kind,
        pointer: at.as_str().to_owned(),
        expected_json,
        actual_json,
    }
}

fn value_mismatch(expected: &Expected<'_>, actual: &Value, at: &Pointer) -> Diff {
    mismatch(
        DiffKind::ValueMismatch,
        at,
        expected.canonical_json(),
        canonical_json(actual),
    )
}

/// Present in the payload, not in the expectation.
fn unexpected(actual: &Value, at: &Pointer) -> Diff {
    mismatch(
        DiffKind::ValueMismatch,
        at,
        MISSING.to_owned(),
        canonical_json(actual),
    )
}

/// Declared by the expectation, missing from the payload.
fn absent(expected: &Expected<'_>, at: &Pointer) -> Diff {
    mismatch(
        DiffKind::ValueMismatch,
        at,
        expected.canonical_json(),
        MISSING.to_owned(),
    )
}
