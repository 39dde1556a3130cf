//! Runtime value types for fever conditions
//!
//! The `Value` enum represents an operand or a record field as seen by the
//! engine. It is deliberately smaller than JSON: the engine only needs text,
//! numbers, local date-times and null.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Runtime value type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Null value
    Null,
    /// Number value (f64 handles both integers and decimals)
    Number(f64),
    /// Text value
    Text(String),
    /// Local date-time, interpreted in the engine's configured time zone
    Time(NaiveDateTime),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_time(&self) -> Option<&NaiveDateTime> {
        match self {
            Value::Time(t) => Some(t),
            _ => None,
        }
    }

    /// Short name of the variant, used in error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Number(_) => "number",
            Value::Text(_) => "text",
            Value::Time(_) => "time",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Number(n) => write!(f, "{}", n),
            Value::Text(s) => write!(f, "{}", s),
            Value::Time(t) => write!(f, "{}", t.format(super::value_type::TIME_FORMAT)),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(n as f64)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n as f64)
    }
}

impl From<NaiveDateTime> for Value {
    fn from(t: NaiveDateTime) -> Self {
        Value::Time(t)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Value::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_value_display() {
        assert_eq!(Value::Number(1.0).to_string(), "1");
        assert_eq!(Value::Number(0.9).to_string(), "0.9");
        assert_eq!(Value::from("fever").to_string(), "fever");

        let t = NaiveDate::from_ymd_opt(2017, 1, 1)
            .unwrap()
            .and_hms_opt(1, 1, 0)
            .unwrap();
        assert_eq!(Value::Time(t).to_string(), "2017-01-01 01:01:00");
    }

    #[test]
    fn test_value_from_option() {
        assert_eq!(Value::from(None::<&str>), Value::Null);
        assert_eq!(Value::from(Some(3)), Value::Number(3.0));
    }

    #[test]
    fn test_value_accessors() {
        let text = Value::from("a");
        assert_eq!(text.as_str(), Some("a"));
        assert_eq!(text.as_number(), None);
        assert!(!text.is_null());
        assert!(Value::Null.is_null());
        assert_eq!(Value::Number(2.5).as_number(), Some(2.5));
    }

    #[test]
    fn test_value_serde_json() {
        let json = serde_json::to_string(&Value::Number(42.0)).unwrap();
        assert_eq!(json, "42.0");

        let text: Value = serde_json::from_str(r#""1,2""#).unwrap();
        assert_eq!(text, Value::Text("1,2".to_string()));

        let null: Value = serde_json::from_str("null").unwrap();
        assert_eq!(null, Value::Null);
    }
}
