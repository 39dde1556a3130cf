//! ConditionEngine - configured evaluator and fragment dispatcher

use crate::config::EngineConfig;
use crate::error::Result;
use chrono::FixedOffset;
use fever_core::Condition;
use fever_runtime::{
    Backend, BoundCondition, Dispatcher, MemoryEvaluator, Record, RelationalDialect, SnippetMap,
};

/// Condition engine
///
/// Evaluates conditions in memory or renders them for a persisted store,
/// with the backend, dialect and time zone taken from [`EngineConfig`].
#[derive(Debug, Clone)]
pub struct ConditionEngine {
    config: EngineConfig,
    evaluator: MemoryEvaluator,
    dispatcher: Dispatcher,
}

impl ConditionEngine {
    pub(crate) fn new(config: EngineConfig, evaluator: MemoryEvaluator, dispatcher: Dispatcher) -> Self {
        Self {
            config,
            evaluator,
            dispatcher,
        }
    }

    /// Evaluate conditions, each bound to its own record
    pub fn evaluate(&self, conditions: &[BoundCondition<'_>]) -> Result<bool> {
        Ok(self.evaluator.evaluate(conditions)?)
    }

    /// Evaluate conditions that all read the same record
    pub fn evaluate_record<R>(&self, record: &R, conditions: &[Condition]) -> Result<bool>
    where
        R: Record,
    {
        Ok(self.evaluator.evaluate_record(record, conditions)?)
    }

    /// Render for the configured backend
    pub fn render(&self, conditions: &[Condition]) -> SnippetMap {
        self.dispatcher.render(self.config.backend, conditions)
    }

    /// Render for an explicit backend
    pub fn render_with(&self, backend: Backend, conditions: &[Condition]) -> SnippetMap {
        self.dispatcher.render(backend, conditions)
    }

    /// Render for a backend given by tag (`relational`, `search`, ...)
    pub fn render_tagged(&self, tag: &str, conditions: &[Condition]) -> Result<SnippetMap> {
        Ok(self.dispatcher.render_tagged(tag, conditions)?)
    }

    /// Relational fragments joined with `AND`, unsupported ones dropped.
    ///
    /// `None` when no condition has a relational rendering.
    pub fn where_clause(&self, conditions: &[Condition]) -> Option<String> {
        let clause = self
            .dispatcher
            .render(Backend::Relational, conditions)
            .conjunction();
        if clause.is_none() && !conditions.is_empty() {
            tracing::debug!("No relational rendering for {} conditions", conditions.len());
        }
        clause
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn backend(&self) -> Backend {
        self.config.backend
    }

    pub fn dialect(&self) -> RelationalDialect {
        self.dispatcher.dialect()
    }

    pub fn time_zone(&self) -> FixedOffset {
        self.evaluator.time_zone()
    }
}
