//! Error types for loading expectations and for the `ensure_matches` convenience.
//!
//! Comparing a payload never fails with an error: discrepancies, including an
//! unparseable payload, are reported as [`Diff`] records.

use crate::diff::{render_report, Diff};
use thiserror::Error;

/// Errors surfaced outside the diff walk itself.
#[derive(Error, Debug)]
pub enum MatchError {
    /// An expectation document was not valid JSON.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// The payload did not match the expectation. Carries every diff, in walk order.
    #[error("payload does not match expectation ({} diffs):\n{}", .0.len(), render_report(.0))]
    Mismatch(Vec<Diff>),
}

/// Convenience alias used throughout jsonmatch.
pub type Result<T> = std::result::Result<T, MatchError>;
