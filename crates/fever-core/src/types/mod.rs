//! Type system for fever conditions
//!
//! - Runtime values
//! - Semantic value types and their coercion/literal rules

pub mod value;
pub mod value_type;

pub use value::Value;
pub use value_type::{split_tokens, ValueType, TIME_FORMAT, TOKEN_DELIMITER};
