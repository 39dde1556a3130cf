//! Operator / value-type table
//!
//! The single place that says which operators are defined for which value
//! types. Evaluators and generators consult it before doing any work; every
//! backend-specific restriction (e.g. a dialect lacking a primitive) is
//! layered on top of it, never instead of it.

use super::operator::Operator;
use crate::types::ValueType;

/// Value types an operator is defined for
pub fn value_types_for(operator: Operator) -> &'static [ValueType] {
    use ValueType::*;

    match operator {
        Operator::Is | Operator::Not | Operator::IsNull | Operator::IsNotNull => {
            &[Text, LongText, Numeric, Time, CommaSplit]
        }

        Operator::GreaterThan
        | Operator::GreaterThanEq
        | Operator::LessThan
        | Operator::LessThanEq => &[Numeric, Time],

        Operator::PrefixContains
        | Operator::PrefixNotContains
        | Operator::SuffixContains
        | Operator::SuffixNotContains
        | Operator::Contains
        | Operator::NotContains => &[Text, LongText],

        Operator::Today | Operator::Yesterday | Operator::Tomorrow => &[Time],

        Operator::IsAny
        | Operator::NotAny
        | Operator::ContainsAny
        | Operator::NotContainsAny
        | Operator::PrefixContainsAny
        | Operator::PrefixNotContainsAny
        | Operator::SuffixContainsAny
        | Operator::SuffixNotContainsAny => &[CommaSplit],
    }
}

/// Returns true if `operator` is defined for `value_type`
pub fn supports(operator: Operator, value_type: ValueType) -> bool {
    value_types_for(operator).contains(&value_type)
}

/// Operators defined for a value type, in catalogue order
pub fn operators_for(value_type: ValueType) -> Vec<Operator> {
    Operator::ALL
        .iter()
        .copied()
        .filter(|op| supports(*op, value_type))
        .collect()
}
