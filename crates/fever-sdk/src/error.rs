//! SDK error types

use thiserror::Error;

/// SDK error type
#[derive(Error, Debug)]
pub enum SdkError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Runtime error
    #[error("Runtime error: {0}")]
    Runtime(#[from] fever_runtime::RuntimeError),

    /// Core error
    #[error("Core error: {0}")]
    Core(#[from] fever_core::CoreError),
}

/// Result type for SDK operations
pub type Result<T> = std::result::Result<T, SdkError>;

#[cfg(test)]
mod tests {
    use super::*;
    use fever_core::{CoreError, Operator, ValueType};
    use fever_runtime::RuntimeError;

    #[test]
    fn test_config_error() {
        let error = SdkError::ConfigError("Invalid time zone".to_string());
        assert!(error.to_string().contains("Configuration error"));
        assert!(error.to_string().contains("Invalid time zone"));
    }

    #[test]
    fn test_runtime_error_conversion() {
        let runtime = RuntimeError::Validation {
            field: "amount".to_string(),
        };
        let error: SdkError = runtime.into();
        assert!(error.to_string().contains("Runtime error"));
        assert!(error.to_string().contains("amount"));
    }

    #[test]
    fn test_unsupported_condition_message() {
        let error: SdkError = RuntimeError::UnsupportedCondition {
            field: "name".to_string(),
            operator: Operator::GreaterThan,
            value_type: ValueType::Text,
        }
        .into();
        let message = error.to_string();
        assert!(message.contains("GREATER_THAN"));
        assert!(message.contains("TEXT"));
    }

    #[test]
    fn test_core_error_conversion() {
        let error: SdkError = CoreError::UnknownOperator("BETWEEN".to_string()).into();
        assert!(error.to_string().contains("Core error"));
        assert!(error.to_string().contains("BETWEEN"));
    }

    #[test]
    fn test_error_debug_format() {
        let error = SdkError::ConfigError("test".to_string());
        let debug_str = format!("{:?}", error);
        assert!(debug_str.contains("ConfigError"));
    }
}
