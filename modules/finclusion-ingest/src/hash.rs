//! Deterministic content fingerprints for raw payloads.
//!
//! The archive dedupes on `(source_id, payload_hash)`, so two records that
//! are logically identical must hash identically no matter what key order
//! the API served them in. Canonical form: recursively sorted object keys,
//! compact separators, then SHA-256 over the UTF-8 bytes.

use std::collections::BTreeMap;

use serde_json::Value;
use sha2::{Digest, Sha256};

/// Lowercase hex SHA-256 of the canonical JSON encoding of `payload`.
pub fn fingerprint(payload: &Value) -> String {
    hex::encode(Sha256::digest(canonical_json(payload).as_bytes()))
}

/// Serialize with object keys sorted at every nesting level.
pub(crate) fn canonical_json(value: &Value) -> String {
    serde_json::to_string(&canonicalize(value)).unwrap_or_default()
}

fn canonicalize(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            let sorted: BTreeMap<&String, Value> =
                map.iter().map(|(k, v)| (k, canonicalize(v))).collect();
            serde_json::to_value(sorted).unwrap_or(Value::Null)
        }
        Value::Array(items) => Value::Array(items.iter().map(canonicalize).collect()),
        other => other.clone(),
    }
}
