//! Structural comparison of JSON documents.

use serde_json::Value;

/// Compare two JSON values structurally.
///
/// Numbers compare by numeric value, so an integer `100` sent back by the
/// remote matches a desired `100.0`. Objects match when they hold the same
/// keys with matching values, regardless of key order.
///
/// ```rust
/// use dogtrainer_types::values_match;
/// use serde_json::json;
///
/// assert!(values_match(&json!({"a": 1, "b": [2.0]}), &json!({"b": [2], "a": 1.0})));
/// assert!(!values_match(&json!({"a": 1}), &json!({"a": 1, "b": 2})));
/// ```
pub fn values_match(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Number(l), Value::Number(r)) => match (l.as_f64(), r.as_f64()) {
            (Some(l), Some(r)) => l == r,
            _ => l == r,
        },
        (Value::Array(l), Value::Array(r)) => {
            l.len() == r.len() && l.iter().zip(r).all(|(l, r)| values_match(l, r))
        }
        (Value::Object(l), Value::Object(r)) => {
            l.len() == r.len()
                && l
                    .iter()
                    .all(|(key, lv)| r.get(key).is_some_and(|rv| values_match(lv, rv)))
        }
        _ => left == right,
    }
}
