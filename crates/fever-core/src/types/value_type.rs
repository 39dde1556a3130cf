//! Semantic value types
//!
//! A `ValueType` tells the engine how to read an operand or a field value:
//! which literals it accepts and how it is written back into a query fragment.

use super::value::Value;
use crate::error::{CoreError, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Canonical literal format for `TIME` values; fractional seconds only when non-zero
pub const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

/// Accepted input formats for `TIME` literals, tried in order
const TIME_INPUT_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

/// Delimiter of `COMMA_SPLIT` fields and multi-value operands
pub const TOKEN_DELIMITER: char = ',';

/// Semantic kind of a condition operand
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ValueType {
    /// Short text
    Text,
    /// Long text (not indexed for pattern matching in relational stores)
    LongText,
    /// Numeric value
    Numeric,
    /// Local date-time
    Time,
    /// Text holding a comma separated set of tokens
    CommaSplit,
}

impl ValueType {
    pub const ALL: [ValueType; 5] = [
        ValueType::Text,
        ValueType::LongText,
        ValueType::Numeric,
        ValueType::Time,
        ValueType::CommaSplit,
    ];

    /// Wire name (e.g. `LONG_TEXT`)
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueType::Text => "TEXT",
            ValueType::LongText => "LONG_TEXT",
            ValueType::Numeric => "NUMERIC",
            ValueType::Time => "TIME",
            ValueType::CommaSplit => "COMMA_SPLIT",
        }
    }

    /// Returns true for the kinds stored as plain strings
    pub fn is_textual(&self) -> bool {
        matches!(
            self,
            ValueType::Text | ValueType::LongText | ValueType::CommaSplit
        )
    }

    /// Coerce a value into this type's native representation.
    ///
    /// `Null` always stays `Null`. Malformed literals are rejected rather
    /// than defaulted.
    pub fn coerce(&self, value: Value) -> Result<Value> {
        match (self, value) {
            (_, Value::Null) => Ok(Value::Null),

            (vt, Value::Text(s)) if vt.is_textual() => Ok(Value::Text(s)),
            (vt, Value::Number(n)) if vt.is_textual() => Ok(Value::Text(n.to_string())),
            (vt, Value::Time(t)) if vt.is_textual() => {
                Ok(Value::Text(t.format(TIME_FORMAT).to_string()))
            }

            (ValueType::Numeric, Value::Number(n)) => self.finite(n),
            (ValueType::Numeric, Value::Text(s)) => match s.trim().parse::<f64>() {
                Ok(n) => self.finite(n),
                Err(_) => Err(self.invalid(format!("'{}' is not a number", s))),
            },

            (ValueType::Time, Value::Time(t)) => Ok(Value::Time(t)),
            (ValueType::Time, Value::Text(s)) => parse_time(&s)
                .map(Value::Time)
                .ok_or_else(|| self.invalid(format!("'{}' is not a date-time", s))),

            (_, other) => Err(self.invalid(format!("cannot read a {} value", other.type_name()))),
        }
    }

    /// Render a coerced value as a bare literal (no quoting or escaping)
    pub fn format_literal(&self, value: &Value) -> String {
        match value {
            Value::Time(t) => t.format(TIME_FORMAT).to_string(),
            other => other.to_string(),
        }
    }

    fn finite(&self, n: f64) -> Result<Value> {
        if n.is_finite() {
            Ok(Value::Number(n))
        } else {
            Err(self.invalid(format!("{} is not a finite number", n)))
        }
    }

    fn invalid(&self, message: String) -> CoreError {
        CoreError::InvalidValue {
            value_type: self.as_str().to_string(),
            message,
        }
    }
}

/// Parse a `TIME` literal; a bare date means midnight.
///
/// RFC 3339 text keeps the wall-clock time written in its own offset.
fn parse_time(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    TIME_INPUT_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .or_else(|| DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.naive_local()))
        .or_else(|| {
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

/// Split a delimited string into trimmed, non-empty tokens
pub fn split_tokens(s: &str) -> Vec<&str> {
    s.split(TOKEN_DELIMITER)
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect()
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ValueType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        ValueType::ALL
            .iter()
            .copied()
            .find(|vt| vt.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CoreError::UnknownValueType(s.to_string()))
    }
}
