//! Cursor model for resumable pagination.
//!
//! A [`Cursor`] is the decoded, structured form of a position inside a
//! paginated collection: a set of named scalar fields. Its wire form is
//! the [`CursorToken`], an opaque URL-safe string produced by a
//! [`CursorCodec`]. Clients echo tokens back verbatim; only the server
//! ever looks inside.

mod codec;

pub use codec::{CursorCodec, QueryStringCodec};

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A single scalar cursor field value.
///
/// Cursors carry only strings, numbers and booleans. Numbers use
/// [`serde_json::Number`], which spans the integer and float ranges the
/// wire format can represent; non-finite floats are unrepresentable, so
/// encoding a value can never fail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CursorValue {
    /// Textual value (entity ids, sort keys).
    String(String),
    /// Numeric value (rankings, offsets, timestamps).
    Number(serde_json::Number),
    /// Boolean value (filter flags).
    Bool(bool),
}

impl CursorValue {
    /// Returns the string content, if this value is textual.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            CursorValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Converts a JSON value into a cursor value, rejecting non-scalars.
    ///
    /// Arrays, objects and `null` have no cursor representation and
    /// yield `None`.
    pub fn from_json(value: serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::String(s) => Some(CursorValue::String(s)),
            serde_json::Value::Number(n) => Some(CursorValue::Number(n)),
            serde_json::Value::Bool(b) => Some(CursorValue::Bool(b)),
            _ => None,
        }
    }

    /// Converts this value into its JSON counterpart.
    pub fn into_json(self) -> serde_json::Value {
        match self {
            CursorValue::String(s) => serde_json::Value::String(s),
            CursorValue::Number(n) => serde_json::Value::Number(n),
            CursorValue::Bool(b) => serde_json::Value::Bool(b),
        }
    }
}

impl fmt::Display for CursorValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CursorValue::String(s) => f.write_str(s),
            CursorValue::Number(n) => write!(f, "{n}"),
            CursorValue::Bool(b) => write!(f, "{b}"),
        }
    }
}

impl From<&str> for CursorValue {
    fn from(value: &str) -> Self {
        CursorValue::String(value.to_string())
    }
}

impl From<String> for CursorValue {
    fn from(value: String) -> Self {
        CursorValue::String(value)
    }
}

impl From<bool> for CursorValue {
    fn from(value: bool) -> Self {
        CursorValue::Bool(value)
    }
}

impl From<i32> for CursorValue {
    fn from(value: i32) -> Self {
        CursorValue::Number(value.into())
    }
}

impl From<i64> for CursorValue {
    fn from(value: i64) -> Self {
        CursorValue::Number(value.into())
    }
}

impl From<u32> for CursorValue {
    fn from(value: u32) -> Self {
        CursorValue::Number(value.into())
    }
}

impl From<u64> for CursorValue {
    fn from(value: u64) -> Self {
        CursorValue::Number(value.into())
    }
}

impl From<serde_json::Number> for CursorValue {
    fn from(value: serde_json::Number) -> Self {
        CursorValue::Number(value)
    }
}

/// Decoded pagination position: named scalar fields.
///
/// Field names are unique; fields are kept in sorted order, so two
/// cursors built from the same fields in any insertion order are equal
/// and encode to the same token. An empty cursor means "start of the
/// collection".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cursor {
    fields: BTreeMap<String, CursorValue>,
}

impl Cursor {
    /// Reserved field naming the node a page resumes after.
    pub const AFTER_FIELD: &'static str = "after";

    /// Creates an empty cursor (start of the collection).
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a cursor resuming immediately after the given position.
    ///
    /// This is the canonical single-field shape used by the store
    /// adapters: `{after: <id>}`.
    pub fn resume_after(value: impl Into<CursorValue>) -> Self {
        Self::new().with_field(Self::AFTER_FIELD, value)
    }

    /// Adds a field, replacing any previous value under the same name.
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<CursorValue>) -> Self {
        self.insert(name, value);
        self
    }

    /// Inserts a field, replacing any previous value under the same name.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<CursorValue>) {
        self.fields.insert(name.into(), value.into());
    }

    /// Looks up a field by name.
    pub fn field(&self, name: &str) -> Option<&CursorValue> {
        self.fields.get(name)
    }

    /// Returns the reserved `after` field, if present.
    pub fn after(&self) -> Option<&CursorValue> {
        self.field(Self::AFTER_FIELD)
    }

    /// True when no fields are set (start of the collection).
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Iterates fields in sorted name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &CursorValue)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }
}

/// Opaque wire form of a cursor.
///
/// URL-safe, produced by [`CursorCodec::encode`] and handed to clients
/// as-is. Treated as a black box everywhere outside the codec.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CursorToken(String);

impl CursorToken {
    /// Borrows the raw token text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the token, returning the raw text.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for CursorToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for CursorToken {
    fn from(value: String) -> Self {
        CursorToken(value)
    }
}

impl From<&str> for CursorToken {
    fn from(value: &str) -> Self {
        CursorToken(value.to_string())
    }
}

impl AsRef<str> for CursorToken {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
