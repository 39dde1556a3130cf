//! Fever Core - Core types for the fever condition engine
//!
//! This crate provides the vocabulary shared by every evaluation target:
//! - Runtime values and the semantic value types that coerce them
//! - The operator catalogue and its operator/value-type table
//! - Conditions, the unit every evaluator and generator consumes
//! - Error types

pub mod condition;
pub mod error;
pub mod types;

// Re-export commonly used types
pub use condition::{Arity, Condition, MatchKind, Operator};
pub use error::CoreError;
pub use types::{Value, ValueType};
