//! The expectation tree.
//!
//! [`Expected`] is a closed set of node kinds. Anything outside that set
//! (structs, maps with non-string keys, user types) is serialized eagerly on
//! construction and kept as an [`Expected::Opaque`] node, which is compared as
//! a whole instead of field by field.
//!
//! # Examples
//!
//! ```
//! use jsonmatch::Expected;
//!
//! let expected = Expected::object([
//!     ("name", Expected::from("Alice")),
//!     ("tags", Expected::array(["admin", "ops"])),
//! ]);
//! assert!(expected.diff_against(br#"{"tags":["admin","ops"],"name":"Alice"}"#).is_empty());
//! ```

use crate::capture::Capture;
use crate::encoder::{self, canonical_json, Encoded};
use crate::error::Result;
use crate::parser::{parse_payload, JsonType};
use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde::{Serialize, Serializer};
use serde_json::{Number, Value};
use std::fmt::Debug;

/// A literal boolean, number or string.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Scalar {
    Bool(bool),
    Number(Number),
    String(String),
}

impl Scalar {
    pub fn json_type(&self) -> JsonType {
        match self {
            Scalar::Bool(_) => JsonType::Bool,
            Scalar::Number(_) => JsonType::Number,
            Scalar::String(_) => JsonType::String,
        }
    }

    /// Whether `actual` is the same JSON type with an equal value.
    ///
    /// Numbers compare as `serde_json::Number`, so `1` and `1.0` differ.
    pub fn matches(&self, actual: &Value) -> bool {
        match (self, actual) {
            (Scalar::Bool(a), Value::Bool(b)) => a == b,
            (Scalar::Number(a), Value::Number(b)) => a == b,
            (Scalar::String(a), Value::String(b)) => a == b,
            _ => false,
        }
    }
}

impl From<bool> for Scalar {
    fn from(value: bool) -> Self {
        Scalar::Bool(value)
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Scalar::String(value.to_owned())
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Scalar::String(value)
    }
}

impl From<Number> for Scalar {
    fn from(value: Number) -> Self {
        Scalar::Number(value)
    }
}

macro_rules! integer_conversions {
    ($($ty:ty),*) => {$(
        impl From<$ty> for Scalar {
            fn from(value: $ty) -> Self {
                Scalar::Number(Number::from(value))
            }
        }

        impl<'a> From<$ty> for Expected<'a> {
            fn from(value: $ty) -> Self {
                Expected::Scalar(Scalar::from(value))
            }
        }
    )*};
}

integer_conversions!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

/// One node of an expectation tree.
///
/// The lifetime `'a` is the lifetime of the capture destinations borrowed by
/// the tree; trees without captures can be `Expected<'static>`.
#[derive(Debug)]
pub enum Expected<'a> {
    /// Matches JSON `null` only.
    Null,
    /// Matches an identical boolean, number or string.
    Scalar(Scalar),
    /// Matches an array element by element.
    Array(Vec<Expected<'a>>),
    /// Matches an object key by key. Declaration order is kept and decides
    /// the order of diffs for keys missing from the payload.
    Object(IndexMap<String, Expected<'a>>),
    /// Extracts the actual value into a destination instead of comparing it.
    Capture(Capture<'a>),
    /// An eagerly serialized host value, compared as a whole.
    Opaque(Encoded),
}

impl<'a> Expected<'a> {
    pub fn null() -> Self {
        Expected::Null
    }

    pub fn scalar(value: impl Into<Scalar>) -> Self {
        Expected::Scalar(value.into())
    }

    pub fn array<I, T>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Expected<'a>>,
    {
        Expected::Array(items.into_iter().map(Into::into).collect())
    }

    /// Build an object node. A repeated key replaces the earlier value but
    /// keeps its position.
    pub fn object<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Expected<'a>>,
    {
        Expected::Object(
            entries
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }

    /// A capture slot writing into `destination` when the match reaches it.
    ///
    /// ```
    /// use jsonmatch::Expected;
    ///
    /// let mut id = String::new();
    /// let expected = Expected::object([("id", Expected::capture(&mut id))]);
    /// assert!(expected.diff_against(br#"{"id":"abc"}"#).is_empty());
    /// drop(expected);
    /// assert_eq!(id, "abc");
    /// ```
    pub fn capture<T>(destination: &'a mut T) -> Self
    where
        T: DeserializeOwned + Serialize + 'a,
    {
        Expected::Capture(Capture::new(destination))
    }

    /// Serialize an arbitrary host value into an opaque node.
    ///
    /// A value whose serialization fails still produces a node; it reports a
    /// type mismatch wherever it is compared.
    pub fn serialized<T: Serialize + Debug + ?Sized>(value: &T) -> Self {
        Expected::Opaque(encoder::encode(value))
    }

    /// Parse JSON text into a structural expectation (no captures).
    pub fn from_json_str(text: &str) -> Result<Expected<'static>> {
        let value = parse_payload(text.as_bytes())?;
        Ok(Expected::from(value))
    }

    /// Canonical JSON text of this node, or its placeholder.
    pub fn canonical_json(&self) -> String {
        match self {
            Expected::Capture(capture) => capture.placeholder(),
            Expected::Opaque(Encoded::NotMarshalable(placeholder)) => placeholder.clone(),
            _ => match serde_json::to_value(self) {
                Ok(value) => canonical_json(&value),
                // a nested node failed to encode; its placeholder is the message
                Err(err) => err.to_string(),
            },
        }
    }
}

impl Serialize for Expected<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Expected::Null => serializer.serialize_unit(),
            Expected::Scalar(scalar) => scalar.serialize(serializer),
            Expected::Array(items) => serializer.collect_seq(items),
            Expected::Object(fields) => serializer.collect_map(fields),
            Expected::Capture(capture) => capture.serialize(serializer),
            Expected::Opaque(encoded) => encoded.serialize(serializer),
        }
    }
}

/// Structural conversion: arrays and objects become [`Expected::Array`] and
/// [`Expected::Object`] nodes, so mismatches are reported per element.
impl<'a> From<Value> for Expected<'a> {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Expected::Null,
            Value::Bool(b) => Expected::Scalar(Scalar::Bool(b)),
            Value::Number(n) => Expected::Scalar(Scalar::Number(n)),
            Value::String(s) => Expected::Scalar(Scalar::String(s)),
            Value::Array(items) => Expected::array(items),
            Value::Object(fields) => Expected::object(fields),
        }
    }
}

impl<'a> From<Scalar> for Expected<'a> {
    fn from(value: Scalar) -> Self {
        Expected::Scalar(value)
    }
}

impl<'a> From<Capture<'a>> for Expected<'a> {
    fn from(value: Capture<'a>) -> Self {
        Expected::Capture(value)
    }
}

impl<'a> From<bool> for Expected<'a> {
    fn from(value: bool) -> Self {
        Expected::Scalar(Scalar::Bool(value))
    }
}

impl<'a> From<&str> for Expected<'a> {
    fn from(value: &str) -> Self {
        Expected::Scalar(Scalar::from(value))
    }
}

impl<'a> From<String> for Expected<'a> {
    fn from(value: String) -> Self {
        Expected::Scalar(Scalar::String(value))
    }
}

impl<'a> From<Number> for Expected<'a> {
    fn from(value: Number) -> Self {
        Expected::Scalar(Scalar::Number(value))
    }
}

/// Non-finite floats have no JSON representation and become unmatchable.
impl<'a> From<f64> for Expected<'a> {
    fn from(value: f64) -> Self {
        match Number::from_f64(value) {
            Some(number) => Expected::Scalar(Scalar::Number(number)),
            None => Expected::Opaque(Encoded::NotMarshalable(encoder::not_marshalable(&value))),
        }
    }
}

/// `None` expects `null`.
impl<'a, T: Into<Expected<'a>>> From<Option<T>> for Expected<'a> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(inner) => inner.into(),
            None => Expected::Null,
        }
    }
}

impl<'a, T: Into<Expected<'a>>> From<Vec<T>> for Expected<'a> {
    fn from(items: Vec<T>) -> Self {
        Expected::array(items)
    }
}
