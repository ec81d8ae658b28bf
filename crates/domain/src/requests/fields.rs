//! Typed extraction of values from a JSON request body.
//!
//! Every helper names the offending key in its error so the caller can
//! return the message unchanged.

use crate::errors::DomainError;
use serde_json::{Map, Value};

pub type Body = Map<String, Value>;

pub fn missing(key: &str) -> DomainError {
    DomainError::validation(format!("Missing required field: {key}"))
}

/// A field counts as present unless it is absent, `null` or a blank string.
pub fn is_present(body: &Body, key: &str) -> bool {
    match body.get(key) {
        None | Some(Value::Null) => false,
        Some(Value::String(s)) => !s.trim().is_empty(),
        Some(_) => true,
    }
}

/// Fails on the first key of `keys` that is not present.
pub fn require_all(body: &Body, keys: &[&str]) -> Result<(), DomainError> {
    match keys.iter().find(|key| !is_present(body, key)) {
        Some(key) => Err(missing(key)),
        None => Ok(()),
    }
}

pub fn string(key: &str, value: &Value) -> Result<String, DomainError> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Ok(s.trim().to_string()),
        Value::String(_) => Err(DomainError::validation(format!("{key} must not be empty"))),
        _ => Err(DomainError::validation(format!("{key} must be a string"))),
    }
}

/// Accepts a JSON number or a numeric string; rejects zero, negatives and
/// non-finite values.
pub fn price(key: &str, value: &Value) -> Result<f64, DomainError> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    match parsed {
        Some(p) if p.is_finite() && p > 0.0 => Ok(p),
        _ => Err(DomainError::validation(format!(
            "{key} must be a positive number"
        ))),
    }
}

pub fn positive_id(key: &str, value: &Value) -> Result<i32, DomainError> {
    let parsed = match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    };
    parsed
        .filter(|id| *id > 0)
        .and_then(|id| i32::try_from(id).ok())
        .ok_or_else(|| DomainError::validation(format!("{key} must be a positive integer")))
}

pub fn required_string(body: &Body, key: &str) -> Result<String, DomainError> {
    body.get(key).ok_or_else(|| missing(key)).and_then(|v| string(key, v))
}

pub fn required_price(body: &Body, key: &str) -> Result<f64, DomainError> {
    body.get(key).ok_or_else(|| missing(key)).and_then(|v| price(key, v))
}

pub fn required_id(body: &Body, key: &str) -> Result<i32, DomainError> {
    body.get(key).ok_or_else(|| missing(key)).and_then(|v| positive_id(key, v))
}

/// Update-side lookup for a non-nullable column: absent or `null` means
/// "leave unchanged".
pub fn optional<'a>(body: &'a Body, key: &str) -> Option<&'a Value> {
    body.get(key).filter(|v| !v.is_null())
}

/// Update-side lookup for a nullable column: absent is `None`, `null` is
/// `Some(None)`.
pub fn nullable<'a>(body: &'a Body, key: &str) -> Option<Option<&'a Value>> {
    body.get(key).map(|v| if v.is_null() { None } else { Some(v) })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn body(value: Value) -> Body {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn require_all_names_first_missing_key_in_order() {
        let b = body(json!({"a": "x", "c": ""}));
        let err = require_all(&b, &["a", "b", "c"]).unwrap_err();
        assert_eq!(err.to_string(), "Missing required field: b");
    }

    #[test]
    fn blank_and_null_are_missing() {
        let b = body(json!({"a": "   ", "b": null, "c": 0}));
        assert!(!is_present(&b, "a"));
        assert!(!is_present(&b, "b"));
        assert!(is_present(&b, "c"));
    }

    #[test]
    fn price_boundaries() {
        assert!(price("Price", &json!(0)).is_err());
        assert!(price("Price", &json!(0.0)).is_err());
        assert!(price("Price", &json!(-3.5)).is_err());
        assert_eq!(price("Price", &json!(0.0001)).unwrap(), 0.0001);
        assert_eq!(price("Price", &json!("12.50")).unwrap(), 12.5);
        let err = price("Price", &json!("cheap")).unwrap_err();
        assert_eq!(err.to_string(), "Price must be a positive number");
    }

    #[test]
    fn ids_must_be_positive_integers() {
        assert_eq!(positive_id("UID", &json!(7)).unwrap(), 7);
        assert_eq!(positive_id("UID", &json!("7")).unwrap(), 7);
        assert!(positive_id("UID", &json!(0)).is_err());
        assert!(positive_id("UID", &json!(1.5)).is_err());
        assert!(positive_id("UID", &json!(i64::from(i32::MAX) + 1)).is_err());
    }

    #[test]
    fn nullable_distinguishes_absent_from_null() {
        let b = body(json!({"UID": null}));
        assert_eq!(nullable(&b, "UID"), Some(None));
        assert_eq!(nullable(&b, "Description"), None);
        assert!(optional(&b, "UID").is_none());
    }
}
