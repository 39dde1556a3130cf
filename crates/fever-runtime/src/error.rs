//! Runtime error types

use fever_core::{CoreError, Operator, ValueType};
use thiserror::Error;

/// Runtime error
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RuntimeError {
    /// A memory condition names a field its record does not expose
    #[error("Validation error: record has no field '{field}'")]
    Validation { field: String },

    /// Operator is not defined for the value type
    #[error("Unsupported condition: {operator} is not defined for {value_type} (field '{field}')")]
    UnsupportedCondition {
        field: String,
        operator: Operator,
        value_type: ValueType,
    },

    /// Backend tag outside the supported set
    #[error("Unsupported backend: {0}")]
    UnsupportedBackend(String),

    /// Relational dialect tag outside the supported set
    #[error("Unsupported dialect: {0}")]
    UnsupportedDialect(String),

    /// Operand or field value could not be coerced
    #[error(transparent)]
    Core(#[from] CoreError),
}

/// Result type for runtime operations
pub type Result<T> = std::result::Result<T, RuntimeError>;
