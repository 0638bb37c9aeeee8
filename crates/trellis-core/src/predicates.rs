//! Pure predicates over JSON specification values.
//!
//! The compiler's gating rules all reduce to "is this a usable
//! string / collection / mapping"; keeping them here keeps the rule
//! table in the compiler readable and the checks testable in
//! isolation.

use serde_json::{Map, Value};

/// A non-empty string after trimming. Returns the trimmed slice.
pub fn valid_str(value: &Value) -> Option<&str> {
    match value {
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed)
            }
        }
        _ => None,
    }
}

/// A non-empty JSON array.
pub fn valid_array(value: &Value) -> Option<&Vec<Value>> {
    match value {
        Value::Array(items) if !items.is_empty() => Some(items),
        _ => None,
    }
}

/// A non-empty JSON object.
pub fn valid_object(value: &Value) -> Option<&Map<String, Value>> {
    match value {
        Value::Object(map) if !map.is_empty() => Some(map),
        _ => None,
    }
}

/// Convenience for optional entries: applies [`valid_str`] when the
/// value is present.
pub fn valid_str_opt(value: Option<&Value>) -> Option<&str> {
    value.and_then(valid_str)
}
