//! Canonical encoding of expectations and canonical JSON text.
//!
//! Arbitrary host values enter an expectation through serde: they are
//! serialized once, eagerly, into a `serde_json::Value`. A value that fails to
//! serialize does not abort construction; it becomes a terminal node that
//! never matches and renders as a diagnostic placeholder.
//!
//! Canonical text is compact JSON with object keys sorted lexically at every
//! depth. Both sides of every diff are rendered this way, so key order in the
//! source payload or in a struct declaration never shows up in diff output.

use crate::parser::parse_payload;
use serde::ser::{Error as _, SerializeMap};
use serde::{Serialize, Serializer};
use serde_json::Value;
use std::fmt::Debug;
use tracing::debug;

/// The result of eagerly encoding a host value.
#[derive(Debug, Clone, PartialEq)]
pub enum Encoded {
    /// The value serialized successfully.
    Json(Value),
    /// Serialization failed. Holds the `<not marshalable to JSON, ...>` placeholder.
    NotMarshalable(String),
}

/// Serialize `value` into an [`Encoded`] node.
///
/// The value goes through JSON text and is parsed back, so it compares
/// exactly like its own encoding would (an `f32` stays `0.1`, not its
/// widened `f64` digits).
pub fn encode<T: Serialize + Debug + ?Sized>(value: &T) -> Encoded {
    match serde_json::to_vec(value).and_then(|bytes| parse_payload(&bytes)) {
        Ok(json) => Encoded::Json(json),
        Err(err) => {
            debug!(error = %err, type_name = std::any::type_name::<T>(), "expectation is not marshalable");
            Encoded::NotMarshalable(not_marshalable(value))
        }
    }
}

/// Placeholder text for a value that cannot be rendered as JSON.
pub fn not_marshalable<T: Debug + ?Sized>(value: &T) -> String {
    format!(
        "<not marshalable to JSON, {:?} is {}>",
        value,
        std::any::type_name::<T>()
    )
}

impl Serialize for Encoded {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Encoded::Json(value) => value.serialize(serializer),
            Encoded::NotMarshalable(placeholder) => Err(S::Error::custom(placeholder)),
        }
    }
}

/// Serializes a borrowed value with object keys sorted at every depth.
struct Sorted<'v>(&'v Value);

impl Serialize for Sorted<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.0 {
            Value::Array(items) => serializer.collect_seq(items.iter().map(Sorted)),
            Value::Object(fields) => {
                let mut entries: Vec<(&String, &Value)> = fields.iter().collect();
                entries.sort_by(|a, b| a.0.cmp(b.0));
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (key, value) in entries {
                    map.serialize_entry(key, &Sorted(value))?;
                }
                map.end()
            }
            scalar => scalar.serialize(serializer),
        }
    }
}

/// Render `value` as canonical JSON text.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use jsonmatch::canonical_json;
///
/// let value = json!({"b": [1, {"d": null, "c": true}], "a": "x"});
/// assert_eq!(canonical_json(&value), r#"{"a":"x","b":[1,{"c":true,"d":null}]}"#);
/// ```
pub fn canonical_json(value: &Value) -> String {
    // Serializing a `Value` cannot fail: every key is already a string.
    serde_json::to_string(&Sorted(value)).unwrap_or_else(|_| value.to_string())
}
