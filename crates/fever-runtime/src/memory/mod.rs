//! Memory Evaluation
//!
//! Evaluates conditions directly against in-process records. Every condition
//! is a pure predicate; the list is AND-combined and evaluation stops at the
//! first condition that does not hold.

mod predicate;

use crate::clock::{Clock, SystemClock};
use crate::error::{Result, RuntimeError};
use crate::record::{BoundCondition, Record};
use chrono::{FixedOffset, Offset, Utc};
use fever_core::Condition;
use std::sync::Arc;

use predicate::evaluate_predicate;

/// Evaluator for conditions bound to in-memory records
#[derive(Debug, Clone)]
pub struct MemoryEvaluator {
    clock: Arc<dyn Clock>,
    zone: FixedOffset,
}

impl Default for MemoryEvaluator {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryEvaluator {
    /// Evaluator on the system clock, calendar days in UTC
    pub fn new() -> Self {
        Self {
            clock: Arc::new(SystemClock),
            zone: Utc.fix(),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Time zone in which relative-date operators read calendar days
    pub fn with_time_zone(mut self, zone: FixedOffset) -> Self {
        self.zone = zone;
        self
    }

    pub fn time_zone(&self) -> FixedOffset {
        self.zone
    }

    /// Evaluate conditions, each bound to its own record.
    ///
    /// Returns `true` iff every condition holds; an empty list holds.
    /// Fails if a condition names a field its record does not expose or
    /// pairs an operator with a value type it is not defined for.
    pub fn evaluate(&self, conditions: &[BoundCondition<'_>]) -> Result<bool> {
        for (idx, bound) in conditions.iter().enumerate() {
            if !self.evaluate_one(bound.record, bound.condition)? {
                tracing::debug!(
                    "Condition {} ({} {}) does not hold",
                    idx + 1,
                    bound.condition.identifier,
                    bound.condition.operator
                );
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Evaluate conditions that all read the same record
    pub fn evaluate_record<R>(&self, record: &R, conditions: &[Condition]) -> Result<bool>
    where
        R: Record,
    {
        let bound: Vec<BoundCondition<'_>> = conditions
            .iter()
            .map(|c| BoundCondition::new(record, c))
            .collect();
        self.evaluate(&bound)
    }

    fn evaluate_one(&self, record: &dyn Record, condition: &Condition) -> Result<bool> {
        if !condition.is_supported() {
            return Err(RuntimeError::UnsupportedCondition {
                field: condition.identifier.clone(),
                operator: condition.operator,
                value_type: condition.value_type,
            });
        }

        let raw = record
            .field(&condition.identifier)
            .ok_or_else(|| RuntimeError::Validation {
                field: condition.identifier.clone(),
            })?;
        let field = condition.value_type.coerce(raw)?;
        let condition = condition.clone().normalized()?;

        let holds = evaluate_predicate(&condition, &field, self.clock.as_ref(), &self.zone);
        tracing::trace!(
            "{} {} {:?} against {:?} => {}",
            condition.identifier,
            condition.operator,
            condition.operand,
            field,
            holds
        );
        Ok(holds)
    }
}
