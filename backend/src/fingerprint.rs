//! Breakdown fingerprinting
//!
//! Deterministic SHA-256 digest of a breakdown over canonical (key-sorted)
//! JSON. Two uses:
//! - `Split::finalize` verifies the breakdown has not been edited in place
//!   since calculation
//! - Determinism tests assert that identical input produces an identical
//!   digest
//!
//! Canonicalization sorts all object keys recursively so the digest does
//! not depend on map iteration order.

use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::models::split::{Breakdown, SplitError};

/// Compute the deterministic SHA-256 fingerprint of a breakdown
pub fn breakdown_fingerprint(breakdown: &Breakdown) -> Result<String, SplitError> {
    canonical_sha256(breakdown)
}

/// SHA-256 over canonical JSON of any serializable value
fn canonical_sha256<T: Serialize>(value: &T) -> Result<String, SplitError> {
    use serde_json::Value;
    use std::collections::BTreeMap;

    let value = serde_json::to_value(value)
        .map_err(|e| SplitError::Serialization(format!("fingerprint serialization failed: {}", e)))?;

    // Recursively sort all object keys for canonical representation
    fn canonicalize(value: Value) -> Value {
        match value {
            Value::Object(map) => {
                let sorted: BTreeMap<String, Value> =
                    map.into_iter().map(|(k, v)| (k, canonicalize(v))).collect();
                Value::Object(sorted.into_iter().collect())
            }
            Value::Array(arr) => Value::Array(arr.into_iter().map(canonicalize).collect()),
            other => other,
        }
    }

    let canonical = canonicalize(value);
    let json = serde_json::to_string(&canonical)
        .map_err(|e| SplitError::Serialization(format!("fingerprint serialization failed: {}", e)))?;

    let mut hasher = Sha256::new();
    hasher.update(json.as_bytes());
    Ok(format!("{:x}", hasher.finalize()))
}
