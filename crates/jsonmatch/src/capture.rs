//! Capture slots: expectation nodes that extract a value instead of comparing it.
//!
//! A capture holds a `&mut T` for the lifetime of the expectation tree. When
//! the walker reaches it, the actual subtree is deserialized into a fresh `T`
//! and, only if that succeeds, written over the destination. The slot then
//! counts as matched and nothing below it is compared.
//!
//! The destination sits behind a `RefCell` inside a non-`Send` trait object,
//! so an [`Expected`](crate::Expected) tree never crosses threads: two threads
//! cannot drive matches that write the same destination.

use crate::diff::{Diff, DiffKind};
use crate::encoder::canonical_json;
use crate::pointer::Pointer;
use serde::de::DeserializeOwned;
use serde::ser::Error as _;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;
use std::cell::RefCell;
use std::fmt;
use tracing::trace;

/// Type-erased view of a capture destination.
trait Slot {
    /// Decode `actual` into the destination. Leaves it untouched on error.
    fn store(&self, actual: &Value) -> serde_json::Result<()>;

    /// The destination's current value, as JSON.
    fn current(&self) -> serde_json::Result<Value>;

    fn type_name(&self) -> &'static str;
}

struct Destination<'a, T> {
    target: RefCell<&'a mut T>,
}

impl<T> Slot for Destination<'_, T>
where
    T: DeserializeOwned + Serialize,
{
    fn store(&self, actual: &Value) -> serde_json::Result<()> {
        let decoded = T::deserialize(actual)?;
        **self.target.borrow_mut() = decoded;
        Ok(())
    }

    fn current(&self) -> serde_json::Result<Value> {
        serde_json::to_value(&**self.target.borrow())
    }

    fn type_name(&self) -> &'static str {
        std::any::type_name::<T>()
    }
}

/// A write destination inside an expectation tree.
///
/// Build one with [`Expected::capture`](crate::Expected::capture).
pub struct Capture<'a> {
    slot: Box<dyn Slot + 'a>,
}

impl<'a> Capture<'a> {
    pub fn new<T>(destination: &'a mut T) -> Self
    where
        T: DeserializeOwned + Serialize + 'a,
    {
        Self {
            slot: Box::new(Destination {
                target: RefCell::new(destination),
            }),
        }
    }

    /// Rendering of this slot on the expected side of a diff.
    pub fn placeholder(&self) -> String {
        format!(
            "<capture slot of type &mut {}>",
            short_type_name(self.slot.type_name())
        )
    }

    /// Store `actual` into the destination, or report why it was rejected.
    pub(crate) fn resolve(&self, actual: &Value, at: &Pointer, diffs: &mut Vec<Diff>) {
        match self.slot.store(actual) {
            Ok(()) => {
                trace!(pointer = %at, type_name = self.slot.type_name(), "captured value");
            }
            Err(err) => {
                trace!(pointer = %at, error = %err, "capture slot rejected value");
                diffs.push(Diff {
                    kind: DiffKind::CaptureFailed(err.to_string()),
                    pointer: at.to_string(),
                    expected_json: self.placeholder(),
                    actual_json: canonical_json(actual),
                });
            }
        }
    }
}

/// Drop module paths from a type name, including inside generic arguments:
/// `alloc::vec::Vec<alloc::string::String>` becomes `Vec<String>`.
pub fn short_type_name(full: &str) -> String {
    let mut out = String::with_capacity(full.len());
    let mut segment_start = 0;
    for (pos, ch) in full.char_indices() {
        if ch.is_alphanumeric() || ch == '_' || ch == ':' {
            continue;
        }
        push_last_segment(&mut out, &full[segment_start..pos]);
        out.push(ch);
        segment_start = pos + ch.len_utf8();
    }
    push_last_segment(&mut out, &full[segment_start..]);
    out
}

fn push_last_segment(out: &mut String, path: &str) {
    out.push_str(path.rsplit("::").next().unwrap_or(path));
}

impl fmt::Debug for Capture<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Capture")
            .field("type", &self.slot.type_name())
            .finish()
    }
}

/// A capture serializes as the destination's current value. This is what an
/// opaque expectation sees when a capture is nested in a host value the
/// walker cannot descend into.
impl Serialize for Capture<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.slot
            .current()
            .map_err(S::Error::custom)?
            .serialize(serializer)
    }
}
