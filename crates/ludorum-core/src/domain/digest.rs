//! Canonical JSON and SHA-256 digests for auditable reports.
//!
//! Standings are published with a digest of their canonical form so a
//! printed sheet can be checked against a recomputation. Canonical form:
//! object keys sorted, integral floats written as integers, compact output.

use serde::Serialize;
use serde_json::{Map, Number, Value};
use sha2::{Digest, Sha256};

use crate::domain::error::{Result, ScoringError};

fn canonicalize(value: &Value) -> Result<Value> {
    Ok(match value {
        Value::Object(map) => {
            let mut entries: Vec<(&String, &Value)> = map.iter().collect();
            entries.sort_by(|a, b| a.0.cmp(b.0));
            let mut sorted = Map::new();
            for (key, v) in entries {
                sorted.insert(key.clone(), canonicalize(v)?);
            }
            Value::Object(sorted)
        }
        Value::Array(items) => Value::Array(
            items
                .iter()
                .map(canonicalize)
                .collect::<Result<Vec<_>>>()?,
        ),
        Value::Number(n) if n.is_f64() => {
            let f = n.as_f64().unwrap_or(f64::NAN);
            if !f.is_finite() {
                return Err(ScoringError::NonCanonical(format!("non-finite number {f}")));
            }
            if f.fract() == 0.0 && f.abs() < 9_007_199_254_740_992.0 {
                Value::Number(Number::from(f as i64))
            } else {
                Value::Number(n.clone())
            }
        }
        other => other.clone(),
    })
}

/// Canonical compact JSON text of any serializable value.
pub fn canonical_json<T: Serialize>(value: &T) -> Result<String> {
    let value = serde_json::to_value(value)?;
    Ok(serde_json::to_string(&canonicalize(&value)?)?)
}

/// Lowercase hex SHA-256 of the canonical JSON of `value`.
pub fn digest_of<T: Serialize>(value: &T) -> Result<String> {
    let canonical = canonical_json(value)?;
    Ok(hex::encode(Sha256::digest(canonical.as_bytes())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_keys_are_sorted() {
        let canonical = canonical_json(&json!({ "b": 1, "a": { "d": 2, "c": 3 } })).unwrap();
        assert_eq!(canonical, r#"{"a":{"c":3,"d":2},"b":1}"#);
    }

    #[test]
    fn test_integral_floats_collapse() {
        let canonical = canonical_json(&json!({ "points": 7.0, "half": 6.5 })).unwrap();
        assert_eq!(canonical, r#"{"half":6.5,"points":7}"#);
    }

    #[test]
    fn test_digest_ignores_key_order() {
        let a = digest_of(&json!({ "x": 1, "y": [1, 2] })).unwrap();
        let b = digest_of(&json!({ "y": [1, 2], "x": 1.0 })).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);
    }

    #[test]
    fn test_digest_sensitive_to_array_order() {
        let a = digest_of(&json!([1, 2])).unwrap();
        let b = digest_of(&json!([2, 1])).unwrap();
        assert_ne!(a, b);
    }
}
