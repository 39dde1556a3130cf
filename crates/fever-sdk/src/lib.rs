//! Fever Condition Engine SDK
//!
//! High-level API for evaluating conditions in memory and rendering them as
//! relational or search query fragments.

pub mod builder;
pub mod config;
pub mod engine;
pub mod error;
pub mod telemetry;

// Re-export main types
pub use builder::ConditionEngineBuilder;
pub use config::EngineConfig;
pub use engine::ConditionEngine;
pub use error::{Result, SdkError};
pub use telemetry::init_tracing;

// Re-export commonly used types from dependencies
pub use fever_core::{Condition, Operator, Value, ValueType};
pub use fever_runtime::{
    Backend, BoundCondition, Clock, FixedClock, FnRecord, Fragment, Record, RelationalDialect,
    SnippetMap, SystemClock,
};
