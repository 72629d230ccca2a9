//! # jsonmatch
//!
//! Declarative assertions over JSON payloads that report every discrepancy.
//!
//! An expectation is built from literal scalars, ordered arrays, keyed
//! objects, capture slots, and arbitrary serializable host values. Comparing
//! it against a payload yields an ordered list of [`Diff`] records, each
//! addressed by an RFC 6901 JSON Pointer. An empty list means the payload
//! matches.
//!
//! ## Quick start
//!
//! ```rust
//! use jsonmatch::Expected;
//!
//! let expected = Expected::object([
//!     ("a", Expected::from(1)),
//!     ("b", Expected::array([1, 2])),
//! ]);
//! let diffs = expected.diff_against(br#"{"b":[1,2,3],"c":true}"#);
//!
//! let rendered: Vec<String> = diffs.iter().map(|d| d.to_string()).collect();
//! assert_eq!(rendered, [
//!     r#"value mismatch at "/b/2": expected <missing>, actual 3"#,
//!     r#"value mismatch at "/c": expected <missing>, actual true"#,
//!     r#"value mismatch at "/a": expected 1, actual <missing>"#,
//! ]);
//! ```
//!
//! ## Modules
//!
//! - [`expected`] — the expectation tree and its constructors
//! - [`walker`] — the recursive comparator (`Expected::diff_against`)
//! - [`capture`] — capture slots writing matched values into destinations
//! - [`encoder`] — eager serialization of host values, canonical JSON text
//! - [`parser`] — order-preserving payload parsing
//! - [`pointer`] — JSON Pointer construction
//! - [`diff`] — diff records and report rendering
//! - [`error`] — error types

pub mod capture;
pub mod diff;
pub mod encoder;
pub mod error;
pub mod expected;
pub mod parser;
pub mod pointer;
pub mod walker;

pub use capture::Capture;
pub use diff::{render_report, Diff, DiffKind, MISSING};
pub use encoder::{canonical_json, Encoded};
pub use error::{MatchError, Result};
pub use expected::{Expected, Scalar};
pub use parser::{parse_payload, JsonType};
pub use pointer::Pointer;
