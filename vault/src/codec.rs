//! Conversion between Vault secret records and base64 encoded records.
//!
//! Reading narrows every supported value to text: strings keep their bytes,
//! booleans become `true`/`false` and numbers keep their decimal text. Nulls
//! become the empty value. Objects and arrays have no text form here; they are
//! reported and replaced with the empty value so the rest of the record still
//! comes through.
//!
//! Writing goes the other way and every value comes back as a string.

use crate::error::{VaultError, VaultResult};
use crate::record::{EncodedRecord, SecretRecord, ValueKind};
use base64::{Engine as _, engine::general_purpose::STANDARD};
use serde_json::Value;
use std::borrow::Cow;
use tracing::warn;

/// A field whose value could not be represented as text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnsupportedValue {
    /// Path the record was read from
    pub path: String,
    /// Field name
    pub field: String,
    /// Kind of the dropped value
    pub kind: ValueKind,
}

/// Text form of a value, or `None` for kinds that have none.
fn text_of(value: &Value) -> Option<Cow<'_, str>> {
    match value {
        Value::String(s) => Some(Cow::Borrowed(s.as_str())),
        Value::Bool(true) => Some(Cow::Borrowed("true")),
        Value::Bool(false) => Some(Cow::Borrowed("false")),
        Value::Number(n) => Some(Cow::Owned(n.to_string())),
        Value::Null => Some(Cow::Borrowed("")),
        Value::Object(_) | Value::Array(_) => None,
    }
}

/// Encode a secret record and collect the fields that had to be emptied.
#[must_use]
pub fn decode_with_report(path: &str, record: &SecretRecord) -> (EncodedRecord, Vec<UnsupportedValue>) {
    let mut unsupported = Vec::new();
    let encoded: EncodedRecord = record
        .iter()
        .map(|(field, value)| {
            let text = text_of(value).unwrap_or_else(|| {
                unsupported.push(UnsupportedValue {
                    path: path.to_string(),
                    field: field.clone(),
                    kind: ValueKind::of(value),
                });
                Cow::Borrowed("")
            });
            (field.clone(), STANDARD.encode(text.as_bytes()))
        })
        .collect();

    (encoded, unsupported)
}

/// Encode every field of a secret record read from `path` as base64 text.
///
/// Unsupported fields are logged and emptied; this never fails.
#[must_use]
pub fn decode(path: &str, record: &SecretRecord) -> EncodedRecord {
    let (encoded, unsupported) = decode_with_report(path, record);
    for entry in &unsupported {
        warn!(
            path = %entry.path,
            field = %entry.field,
            kind = %entry.kind,
            "Unsupported secret value kind, field left empty"
        );
    }
    encoded
}

/// Decode a base64 record back into a secret record of string values.
///
/// Fails on the first field, in field-name order, that is not valid base64
/// or does not decode to UTF-8 text.
pub fn encode(record: &EncodedRecord) -> VaultResult<SecretRecord> {
    record
        .iter()
        .map(|(field, encoded)| {
            let bytes = STANDARD.decode(encoded).map_err(|source| VaultError::Encoding {
                field: field.to_string(),
                source,
            })?;
            let text = String::from_utf8(bytes).map_err(|_| VaultError::InvalidUtf8 {
                field: field.to_string(),
            })?;
            Ok((field.to_string(), Value::String(text)))
        })
        .collect()
}
