//! Sample records for tests.

use serde_json::{Value, json};
use vault_kv::{EncodedRecord, SecretRecord};

fn object(value: Value) -> SecretRecord {
    match value {
        Value::Object(map) => map,
        _ => SecretRecord::new(),
    }
}

/// `{"a": "hello", "b": true, "c": 42}`
#[must_use]
pub fn mixed_record() -> SecretRecord {
    object(json!({"a": "hello", "b": true, "c": 42}))
}

/// Record with one field of every kind, including the unsupported ones.
#[must_use]
pub fn all_kinds_record() -> SecretRecord {
    object(json!({
        "username": "svc-billing",
        "enabled": false,
        "port": 5432,
        "ratio": 0.75,
        "rotated": null,
        "options": {"ssl": true},
        "hosts": ["db-1", "db-2"],
    }))
}

/// Database credentials as an encoded record.
#[must_use]
pub fn encoded_credentials() -> EncodedRecord {
    EncodedRecord::from_plaintext([
        ("username", "svc-billing"),
        ("password", "c0rrect-h0rse"),
        ("port", "5432"),
    ])
}

/// Encoded record whose `k` field is not base64.
#[must_use]
pub fn invalid_encoded() -> EncodedRecord {
    [("k", "not-base64!!!")].into_iter().collect()
}
