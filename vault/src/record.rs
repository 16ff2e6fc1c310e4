//! Record types exchanged by the codec.

use crate::error::{VaultError, VaultResult};
use base64::{Engine as _, engine::general_purpose::STANDARD};
use serde_json::Value;
use std::collections::{BTreeMap, btree_map};
use std::fmt;

/// A secret as stored in Vault: field name to dynamically typed JSON value.
pub type SecretRecord = serde_json::Map<String, Value>;

/// Flat mapping of field name to base64 (standard, padded) text.
///
/// Fields are kept ordered by name. `Debug` output never includes values.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct EncodedRecord(BTreeMap<String, String>);

impl EncodedRecord {
    /// Create an empty record.
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Build a record by base64-encoding plaintext values.
    pub fn from_plaintext<K, V, I>(fields: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: AsRef<[u8]>,
    {
        fields
            .into_iter()
            .map(|(k, v)| (k.into(), STANDARD.encode(v)))
            .collect()
    }

    /// Insert an already-encoded value, returning the previous one.
    pub fn insert(&mut self, field: impl Into<String>, encoded: impl Into<String>) -> Option<String> {
        self.0.insert(field.into(), encoded.into())
    }

    /// Encoded value of a field.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    /// Base64-decode a single field.
    ///
    /// Returns `None` when the field is missing.
    pub fn decode_field(&self, field: &str) -> Option<VaultResult<Vec<u8>>> {
        self.0.get(field).map(|encoded| {
            STANDARD.decode(encoded).map_err(|source| VaultError::Encoding {
                field: field.to_string(),
                source,
            })
        })
    }

    /// Number of fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the record has no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Field names in order.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Iterate over `(field, encoded value)` pairs in field order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Unwrap into the underlying map.
    #[must_use]
    pub fn into_inner(self) -> BTreeMap<String, String> {
        self.0
    }
}

impl fmt::Debug for EncodedRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.0.keys().map(|k| (k, "[REDACTED]")))
            .finish()
    }
}

impl From<BTreeMap<String, String>> for EncodedRecord {
    fn from(map: BTreeMap<String, String>) -> Self {
        Self(map)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for EncodedRecord {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

impl IntoIterator for EncodedRecord {
    type Item = (String, String);
    type IntoIter = btree_map::IntoIter<String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Kind of a dynamic secret value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// JSON string
    String,
    /// JSON boolean
    Bool,
    /// JSON number
    Number,
    /// JSON null
    Null,
    /// JSON object
    Object,
    /// JSON array
    Array,
}

impl ValueKind {
    /// Kind of the given value.
    #[must_use]
    pub const fn of(value: &Value) -> Self {
        match value {
            Value::String(_) => Self::String,
            Value::Bool(_) => Self::Bool,
            Value::Number(_) => Self::Number,
            Value::Null => Self::Null,
            Value::Object(_) => Self::Object,
            Value::Array(_) => Self::Array,
        }
    }

    /// Lowercase name used in diagnostics.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Bool => "bool",
            Self::Number => "number",
            Self::Null => "null",
            Self::Object => "object",
            Self::Array => "array",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
