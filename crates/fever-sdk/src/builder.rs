//! Builder pattern for ConditionEngine

use crate::config::EngineConfig;
use crate::engine::ConditionEngine;
use crate::error::Result;
use chrono::FixedOffset;
use fever_runtime::clock::format_offset;
use fever_runtime::{Backend, Clock, Dispatcher, MemoryEvaluator, RelationalDialect};
use std::sync::Arc;

/// Builder for ConditionEngine
///
/// # Example
///
/// ```rust,ignore
/// use fever_sdk::{Backend, ConditionEngineBuilder, EngineConfig};
///
/// // From config/fever.yaml and FEVER_* variables
/// let engine = ConditionEngineBuilder::new()
///     .with_config(EngineConfig::load()?)
///     .build()?;
///
/// // Manual configuration
/// let engine = ConditionEngineBuilder::new()
///     .with_backend(Backend::Search)
///     .with_time_zone(FixedOffset::east_opt(8 * 3600).unwrap())
///     .build()?;
/// ```
#[derive(Debug, Default)]
pub struct ConditionEngineBuilder {
    config: EngineConfig,
    clock: Option<Arc<dyn Clock>>,
}

impl ConditionEngineBuilder {
    /// Create a new builder with default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole configuration
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the backend used by `ConditionEngine::render`
    pub fn with_backend(mut self, backend: Backend) -> Self {
        self.config.backend = backend;
        self
    }

    /// Set the SQL dialect
    pub fn with_dialect(mut self, dialect: RelationalDialect) -> Self {
        self.config.dialect = dialect;
        self
    }

    /// Set the zone in which relative dates are read
    pub fn with_time_zone(mut self, zone: FixedOffset) -> Self {
        self.config.time_zone = format_offset(&zone);
        self
    }

    /// Replace the system clock
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Build the engine
    pub fn build(self) -> Result<ConditionEngine> {
        self.config.validate()?;
        let zone = self.config.zone()?;

        let mut evaluator = MemoryEvaluator::new().with_time_zone(zone);
        if let Some(clock) = self.clock {
            evaluator = evaluator.with_clock(clock);
        }
        let dispatcher = Dispatcher::new(self.config.dialect, zone);

        tracing::info!(
            "Condition engine ready: backend={}, dialect={}, time_zone={}",
            self.config.backend,
            self.config.dialect,
            format_offset(&zone)
        );
        Ok(ConditionEngine::new(self.config, evaluator, dispatcher))
    }
}
