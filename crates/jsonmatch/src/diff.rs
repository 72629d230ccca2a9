//! Diff records produced by the comparator.
//!
//! A [`Diff`] is a pure output value: it names what kind of discrepancy was
//! found, where (as an RFC 6901 pointer), and the canonical JSON text of both
//! sides. An empty `Vec<Diff>` means the payload matched.

use serde::{Serialize, Serializer};
use std::fmt;

/// Placeholder used for the side of a diff where a key or index does not exist.
pub const MISSING: &str = "<missing>";

/// The discrepancy taxonomy. `Display` yields the exact kind strings
/// (`"type mismatch"`, `"value mismatch"`, ...).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiffKind {
    /// The payload is not valid JSON. Always the only diff, at the root.
    UnmarshalError(String),
    /// Expected and actual have different JSON-level types, or the expected
    /// side could not be encoded at all.
    TypeMismatch,
    /// Same JSON-level type but a different value, or a key/index present on
    /// only one side.
    ValueMismatch,
    /// A capture slot's destination type rejected the actual value.
    CaptureFailed(String),
}

impl fmt::Display for DiffKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiffKind::UnmarshalError(message) => write!(f, "unmarshal error ({message})"),
            DiffKind::TypeMismatch => f.write_str("type mismatch"),
            DiffKind::ValueMismatch => f.write_str("value mismatch"),
            DiffKind::CaptureFailed(message) => {
                write!(f, "cannot unmarshal into capture slot ({message})")
            }
        }
    }
}

impl Serialize for DiffKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// One discrepancy between the expected shape and the actual payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diff {
    pub kind: DiffKind,
    /// RFC 6901 pointer into the actual document; `""` is the root.
    pub pointer: String,
    /// Canonical JSON of the expected side, or a `<...>` placeholder.
    pub expected_json: String,
    /// Canonical JSON of the actual side, or a `<...>` placeholder.
    pub actual_json: String,
}

impl fmt::Display for Diff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} at {:?}: expected {}, actual {}",
            self.kind, self.pointer, self.expected_json, self.actual_json
        )
    }
}

/// Render a diff list as one line per diff (no trailing newline).
pub fn render_report(diffs: &[Diff]) -> String {
    diffs
        .iter()
        .map(|d| d.to_string())
        .collect::<Vec<_>>()
        .join("\n")
}
