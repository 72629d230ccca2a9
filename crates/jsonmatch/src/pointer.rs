//! RFC 6901 JSON Pointer accumulation for the diff walk.
//!
//! The walker never parses pointers, it only extends them: every object key
//! or array index it descends into is appended as one escaped reference token.

use std::fmt;

/// A rendered JSON Pointer. The empty pointer addresses the document root.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Pointer(String);

impl Pointer {
    /// The pointer to the document root (`""`).
    pub fn root() -> Self {
        Self(String::new())
    }

    /// Pointer to the member `key` of the object at `self`.
    pub fn key(&self, key: &str) -> Self {
        let mut out = String::with_capacity(self.0.len() + key.len() + 1);
        out.push_str(&self.0);
        out.push('/');
        push_escaped(&mut out, key);
        Self(out)
    }

    /// Pointer to the element `index` of the array at `self`.
    pub fn index(&self, index: usize) -> Self {
        Self(format!("{}/{}", self.0, index))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Pointer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Append a reference token, escaping `~` as `~0` and `/` as `~1`.
fn push_escaped(out: &mut String, token: &str) {
    if !token.contains(['~', '/']) {
        out.push_str(token);
        return;
    }
    for ch in token.chars() {
        match ch {
            '~' => out.push_str("~0"),
            '/' => out.push_str("~1"),
            other => out.push(other),
        }
    }
}
