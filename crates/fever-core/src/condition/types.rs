//! Condition type

use super::catalogue;
use super::operator::{Arity, Operator};
use crate::error::{CoreError, Result};
use crate::types::{split_tokens, Value, ValueType};
use serde::{Deserialize, Serialize};

/// One constraint: `identifier <operator> operand`, typed by `value_type`.
///
/// For memory evaluation the identifier names a record field; for the
/// relational and search generators it names a column or index field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    /// Field or column name
    pub identifier: String,
    /// Semantic type of the field and operand
    pub value_type: ValueType,
    /// Comparison operator
    pub operator: Operator,
    /// Primary operand, absent for nullary operators
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operand: Option<Value>,
    /// Secondary operand; carried and coerced, not read by the current operators
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary_operand: Option<Value>,
}

impl Condition {
    /// Create a condition as given, without coercion
    pub fn new(
        identifier: impl Into<String>,
        value_type: ValueType,
        operator: Operator,
        operand: Option<Value>,
    ) -> Self {
        Self {
            identifier: identifier.into(),
            value_type,
            operator,
            operand,
            secondary_operand: None,
        }
    }

    /// Create a condition, coercing the operand through the value type.
    ///
    /// Fails on malformed literals and on a missing operand for operators
    /// that need one. Nullary operators drop whatever operand was given.
    pub fn try_new(
        identifier: impl Into<String>,
        value_type: ValueType,
        operator: Operator,
        operand: impl Into<Value>,
    ) -> Result<Self> {
        Self::new(identifier, value_type, operator, Some(operand.into())).normalized()
    }

    /// Create a condition for a nullary operator (`IS_NULL`, `TODAY`, ...)
    pub fn nullary(identifier: impl Into<String>, value_type: ValueType, operator: Operator) -> Self {
        Self::new(identifier, value_type, operator, None)
    }

    /// Attach a secondary operand
    pub fn with_secondary(mut self, operand: impl Into<Value>) -> Result<Self> {
        self.secondary_operand = Some(operand.into());
        self.normalized()
    }

    /// Coerce operands and enforce the operator's arity
    pub fn normalized(mut self) -> Result<Self> {
        if self.operator.arity() == Arity::Nullary {
            self.operand = None;
            self.secondary_operand = None;
            return Ok(self);
        }

        self.operand = match self.operand.take() {
            Some(v) if !v.is_null() => Some(self.value_type.coerce(v)?),
            _ => {
                return Err(CoreError::MissingOperand {
                    operator: self.operator.to_string(),
                    field: self.identifier.clone(),
                })
            }
        };

        if let Some(secondary) = self.secondary_operand.take() {
            self.secondary_operand = Some(self.value_type.coerce(secondary)?);
        }
        Ok(self)
    }

    /// Returns true if the operator is defined for the value type
    pub fn is_supported(&self) -> bool {
        catalogue::supports(self.operator, self.value_type)
    }

    /// Tokens of a multi-value operand (empty when absent or not text)
    pub fn tokens(&self) -> Vec<&str> {
        self.operand
            .as_ref()
            .and_then(Value::as_str)
            .map(split_tokens)
            .unwrap_or_default()
    }
}
