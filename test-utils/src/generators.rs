//! Proptest generators for secret records.

use base64::{Engine as _, engine::general_purpose::STANDARD};
use proptest::prelude::*;
use serde_json::{Number, Value};
use vault_kv::{EncodedRecord, SecretRecord};

/// Generate field names.
pub fn field_name_strategy() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_-]{0,15}"
}

/// Generate logical paths such as `secret/team/app`.
pub fn secret_path_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec("[a-z][a-z0-9-]{1,10}", 1..4)
        .prop_map(|segments| format!("secret/{}", segments.join("/")))
}

/// Generate string, boolean and numeric values.
pub fn scalar_value_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        any::<String>().prop_map(Value::String),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::from),
        any::<u64>().prop_map(Value::from),
        (-1.0e12_f64..1.0e12_f64)
            .prop_filter_map("finite", Number::from_f64)
            .prop_map(Value::Number),
    ]
}

/// Generate object and array values.
pub fn nested_value_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        prop::collection::vec(scalar_value_strategy(), 0..4).prop_map(Value::Array),
        prop::collection::btree_map(field_name_strategy(), scalar_value_strategy(), 0..4)
            .prop_map(|map| Value::Object(map.into_iter().collect())),
    ]
}

/// Generate records holding only scalar values.
pub fn scalar_record_strategy() -> impl Strategy<Value = SecretRecord> {
    prop::collection::btree_map(field_name_strategy(), scalar_value_strategy(), 0..8)
        .prop_map(|map| map.into_iter().collect())
}

/// Generate encoded records of arbitrary UTF-8 plaintext.
pub fn encoded_record_strategy() -> impl Strategy<Value = EncodedRecord> {
    prop::collection::btree_map(field_name_strategy(), any::<String>(), 0..8)
        .prop_map(|map| map.into_iter().map(|(k, v)| (k, STANDARD.encode(v))).collect())
}
