//! Error types for Fever Core

use thiserror::Error;

/// Core error type
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error("Invalid value for {value_type}: {message}")]
    InvalidValue { value_type: String, message: String },

    #[error("Operator {operator} requires an operand for field '{field}'")]
    MissingOperand { operator: String, field: String },

    #[error("Unknown operator: {0}")]
    UnknownOperator(String),

    #[error("Unknown value type: {0}")]
    UnknownValueType(String),
}

pub type Result<T> = std::result::Result<T, CoreError>;
