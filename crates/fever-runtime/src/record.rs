//! Record Access
//!
//! The memory evaluator never inspects a record's representation. It asks a
//! [`Record`] for a field by name and gets back either a value (possibly
//! `Value::Null`) or `None` when the record has no such field.

use fever_core::{Condition, Value};
use std::collections::{BTreeMap, HashMap};

/// Field accessor over an arbitrary record
pub trait Record {
    /// Value of the named field, or `None` if the record has no such field
    fn field(&self, name: &str) -> Option<Value>;
}

impl Record for HashMap<String, Value> {
    fn field(&self, name: &str) -> Option<Value> {
        self.get(name).cloned()
    }
}

impl Record for BTreeMap<String, Value> {
    fn field(&self, name: &str) -> Option<Value> {
        self.get(name).cloned()
    }
}

/// JSON objects resolve exact keys first, then dot-notation paths
/// (`user.profile.email`) through nested objects.
impl Record for serde_json::Map<String, serde_json::Value> {
    fn field(&self, name: &str) -> Option<Value> {
        if let Some(v) = self.get(name) {
            return Some(from_json(v));
        }

        let mut parts = name.split('.');
        let mut current = self.get(parts.next()?)?;
        for part in parts {
            current = current.as_object()?.get(part)?;
        }
        Some(from_json(current))
    }
}

/// Adapter turning a closure into a [`Record`]
pub struct FnRecord<F>(pub F);

impl<F> Record for FnRecord<F>
where
    F: Fn(&str) -> Option<Value>,
{
    fn field(&self, name: &str) -> Option<Value> {
        (self.0)(name)
    }
}

/// Convert a JSON value into an engine value.
///
/// Booleans, arrays and objects have no engine counterpart and are read as
/// their JSON text.
pub fn from_json(value: &serde_json::Value) -> Value {
    match value {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::String(s) => Value::Text(s.clone()),
        serde_json::Value::Number(n) => n
            .as_f64()
            .map(Value::Number)
            .unwrap_or_else(|| Value::Text(n.to_string())),
        other => Value::Text(other.to_string()),
    }
}

/// A condition bound to the record it is evaluated against
#[derive(Clone, Copy)]
pub struct BoundCondition<'a> {
    pub record: &'a dyn Record,
    pub condition: &'a Condition,
}

impl<'a> BoundCondition<'a> {
    pub fn new(record: &'a dyn Record, condition: &'a Condition) -> Self {
        Self { record, condition }
    }
}

impl std::fmt::Debug for BoundCondition<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BoundCondition")
            .field("condition", self.condition)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_hash_map_record() {
        let mut data = HashMap::new();
        data.insert("name".to_string(), Value::from("Alice"));
        data.insert("nickname".to_string(), Value::Null);

        assert_eq!(data.field("name"), Some(Value::from("Alice")));
        assert_eq!(data.field("nickname"), Some(Value::Null));
        assert_eq!(data.field("age"), None);
    }

    #[test]
    fn test_json_record_nested_path() {
        let data = json!({
            "user": {"id": 123, "profile": {"email": "alice@example.com"}},
            "flags.beta": true
        });
        let obj = data.as_object().unwrap();

        assert_eq!(obj.field("user.id"), Some(Value::Number(123.0)));
        assert_eq!(
            obj.field("user.profile.email"),
            Some(Value::from("alice@example.com"))
        );
        assert_eq!(obj.field("flags.beta"), Some(Value::from("true")));
        assert_eq!(obj.field("user.missing"), None);
        assert_eq!(obj.field("user.id.deeper"), None);
    }

    #[test]
    fn test_fn_record() {
        let record = FnRecord(|name: &str| (name == "n").then(|| Value::Number(1.0)));
        assert_eq!(record.field("n"), Some(Value::Number(1.0)));
        assert_eq!(record.field("m"), None);
    }
}
