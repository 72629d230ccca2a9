//! Value tree parsing for actual payloads.
//!
//! Payloads are decoded into `serde_json::Value` with the `preserve_order`
//! feature enabled, so object keys iterate in the order they appear in the
//! source text. The diff walker relies on that order to emit diffs
//! deterministically.

use serde::Deserialize;
use serde_json::Value;
use std::borrow::Cow;

/// The JSON-level type of a value. Two nodes whose types differ produce a
/// single "type mismatch" diff and are not compared further.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JsonType {
    Null,
    Bool,
    Number,
    String,
    Array,
    Object,
}

impl JsonType {
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => JsonType::Null,
            Value::Bool(_) => JsonType::Bool,
            Value::Number(_) => JsonType::Number,
            Value::String(_) => JsonType::String,
            Value::Array(_) => JsonType::Array,
            Value::Object(_) => JsonType::Object,
        }
    }
}

/// Parse a payload into an order-preserving value tree.
///
/// Rejects malformed JSON, trailing garbage and invalid UTF-8 inside strings.
/// Nesting depth is not limited: a deep but valid document is compared, not
/// reported as unparseable.
pub fn parse_payload(payload: &[u8]) -> serde_json::Result<Value> {
    let mut deserializer = serde_json::Deserializer::from_slice(payload);
    deserializer.disable_recursion_limit();
    let value = Value::deserialize(&mut deserializer)?;
    deserializer.end()?;
    Ok(value)
}

/// The payload as text, with invalid UTF-8 sequences replaced by U+FFFD.
/// Used to report payloads that could not be parsed.
pub fn lossy_text(payload: &[u8]) -> Cow<'_, str> {
    String::from_utf8_lossy(payload)
}
