//! Per-family predicate evaluation

use chrono::{FixedOffset, NaiveDateTime};
use fever_core::types::split_tokens;
use fever_core::{Condition, MatchKind, Operator, Value};
use std::cmp::Ordering;

use crate::clock::{shifted_today, Clock};

static NULL: Value = Value::Null;

/// Evaluate one supported condition against an already coerced field value
pub(crate) fn evaluate_predicate(
    condition: &Condition,
    field: &Value,
    clock: &dyn Clock,
    zone: &FixedOffset,
) -> bool {
    let op = condition.operator;
    let operand = condition.operand.as_ref().unwrap_or(&NULL);

    match op {
        Operator::IsNull => field.is_null(),
        Operator::IsNotNull => !field.is_null(),

        Operator::Is => equals(field, operand),
        Operator::Not => !equals(field, operand),

        Operator::GreaterThan
        | Operator::GreaterThanEq
        | Operator::LessThan
        | Operator::LessThanEq => match compare(field, operand) {
            Some(ordering) => ordering_holds(op, ordering),
            None => false,
        },

        Operator::Today | Operator::Yesterday | Operator::Tomorrow => match field {
            Value::Time(t) => same_relative_day(t, op, clock, zone),
            _ => false,
        },

        _ => match op.match_kind() {
            Some(kind) if op.is_multi_value() => {
                any_token_pair(field, operand, kind) != op.is_negated()
            }
            Some(kind) => {
                let holds = match (field.as_str(), operand.as_str()) {
                    (Some(s), Some(pattern)) => kind.matches(s, pattern),
                    _ => false,
                };
                holds != op.is_negated()
            }
            None => false,
        },
    }
}

fn equals(field: &Value, operand: &Value) -> bool {
    match (field, operand) {
        (Value::Null, _) | (_, Value::Null) => false,
        (l, r) => l == r,
    }
}

fn compare(field: &Value, operand: &Value) -> Option<Ordering> {
    match (field, operand) {
        (Value::Number(l), Value::Number(r)) => l.partial_cmp(r),
        (Value::Time(l), Value::Time(r)) => Some(l.cmp(r)),
        _ => None,
    }
}

fn ordering_holds(op: Operator, ordering: Ordering) -> bool {
    match op {
        Operator::GreaterThan => ordering == Ordering::Greater,
        Operator::GreaterThanEq => ordering != Ordering::Less,
        Operator::LessThan => ordering == Ordering::Less,
        Operator::LessThanEq => ordering != Ordering::Greater,
        _ => false,
    }
}

fn same_relative_day(
    field: &NaiveDateTime,
    op: Operator,
    clock: &dyn Clock,
    zone: &FixedOffset,
) -> bool {
    let Some(offset) = op.day_offset() else {
        return false;
    };
    match shifted_today(clock.now(), zone, offset) {
        Some(day) => field.date() == day,
        None => false,
    }
}

/// True if some (field token, operand token) pair satisfies `kind`
fn any_token_pair(field: &Value, operand: &Value, kind: MatchKind) -> bool {
    let (Some(field), Some(operand)) = (field.as_str(), operand.as_str()) else {
        return false;
    };
    let tests = split_tokens(operand);
    split_tokens(field)
        .iter()
        .any(|s| tests.iter().any(|t| kind.matches(s, t)))
}
