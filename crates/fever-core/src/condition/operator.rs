//! Operators for fever conditions

use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Comparison operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Operator {
    // Nullary
    IsNull,
    IsNotNull,
    Today,
    Yesterday,
    Tomorrow,

    // Scalar
    Is,
    Not,
    GreaterThan,
    GreaterThanEq,
    LessThan,
    LessThanEq,
    PrefixContains,
    PrefixNotContains,
    SuffixContains,
    SuffixNotContains,
    Contains,
    NotContains,

    // Multi-value, operand is a delimited token list
    IsAny,
    NotAny,
    ContainsAny,
    NotContainsAny,
    PrefixContainsAny,
    PrefixNotContainsAny,
    SuffixContainsAny,
    SuffixNotContainsAny,
}

/// Operand shape of an operator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    /// No operand
    Nullary,
    /// One scalar operand
    Unary,
    /// One operand holding a delimited token list
    MultiValue,
}

/// String relation used by the substring and `_ANY` families
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    Exact,
    Prefix,
    Suffix,
    Contains,
}

impl MatchKind {
    /// Test `candidate` against `pattern` (case-sensitive)
    pub fn matches(&self, candidate: &str, pattern: &str) -> bool {
        match self {
            MatchKind::Exact => candidate == pattern,
            MatchKind::Prefix => candidate.starts_with(pattern),
            MatchKind::Suffix => candidate.ends_with(pattern),
            MatchKind::Contains => candidate.contains(pattern),
        }
    }
}

impl Operator {
    pub const ALL: [Operator; 25] = [
        Operator::IsNull,
        Operator::IsNotNull,
        Operator::Today,
        Operator::Yesterday,
        Operator::Tomorrow,
        Operator::Is,
        Operator::Not,
        Operator::GreaterThan,
        Operator::GreaterThanEq,
        Operator::LessThan,
        Operator::LessThanEq,
        Operator::PrefixContains,
        Operator::PrefixNotContains,
        Operator::SuffixContains,
        Operator::SuffixNotContains,
        Operator::Contains,
        Operator::NotContains,
        Operator::IsAny,
        Operator::NotAny,
        Operator::ContainsAny,
        Operator::NotContainsAny,
        Operator::PrefixContainsAny,
        Operator::PrefixNotContainsAny,
        Operator::SuffixContainsAny,
        Operator::SuffixNotContainsAny,
    ];

    /// Wire name (e.g. `PREFIX_NOT_CONTAINS`)
    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::IsNull => "IS_NULL",
            Operator::IsNotNull => "IS_NOT_NULL",
            Operator::Today => "TODAY",
            Operator::Yesterday => "YESTERDAY",
            Operator::Tomorrow => "TOMORROW",
            Operator::Is => "IS",
            Operator::Not => "NOT",
            Operator::GreaterThan => "GREATER_THAN",
            Operator::GreaterThanEq => "GREATER_THAN_EQ",
            Operator::LessThan => "LESS_THAN",
            Operator::LessThanEq => "LESS_THAN_EQ",
            Operator::PrefixContains => "PREFIX_CONTAINS",
            Operator::PrefixNotContains => "PREFIX_NOT_CONTAINS",
            Operator::SuffixContains => "SUFFIX_CONTAINS",
            Operator::SuffixNotContains => "SUFFIX_NOT_CONTAINS",
            Operator::Contains => "CONTAINS",
            Operator::NotContains => "NOT_CONTAINS",
            Operator::IsAny => "IS_ANY",
            Operator::NotAny => "NOT_ANY",
            Operator::ContainsAny => "CONTAINS_ANY",
            Operator::NotContainsAny => "NOT_CONTAINS_ANY",
            Operator::PrefixContainsAny => "PREFIX_CONTAINS_ANY",
            Operator::PrefixNotContainsAny => "PREFIX_NOT_CONTAINS_ANY",
            Operator::SuffixContainsAny => "SUFFIX_CONTAINS_ANY",
            Operator::SuffixNotContainsAny => "SUFFIX_NOT_CONTAINS_ANY",
        }
    }

    pub fn arity(&self) -> Arity {
        if self.is_null_check() || self.is_relative_date() {
            Arity::Nullary
        } else if self.is_multi_value() {
            Arity::MultiValue
        } else {
            Arity::Unary
        }
    }

    pub fn is_null_check(&self) -> bool {
        matches!(self, Operator::IsNull | Operator::IsNotNull)
    }

    pub fn is_relative_date(&self) -> bool {
        matches!(self, Operator::Today | Operator::Yesterday | Operator::Tomorrow)
    }

    /// Returns true for `GREATER_THAN*` and `LESS_THAN*`
    pub fn is_ordering(&self) -> bool {
        matches!(
            self,
            Operator::GreaterThan
                | Operator::GreaterThanEq
                | Operator::LessThan
                | Operator::LessThanEq
        )
    }

    /// Returns true for the scalar prefix/suffix/contains family
    pub fn is_substring(&self) -> bool {
        matches!(
            self,
            Operator::PrefixContains
                | Operator::PrefixNotContains
                | Operator::SuffixContains
                | Operator::SuffixNotContains
                | Operator::Contains
                | Operator::NotContains
        )
    }

    pub fn is_multi_value(&self) -> bool {
        matches!(
            self,
            Operator::IsAny
                | Operator::NotAny
                | Operator::ContainsAny
                | Operator::NotContainsAny
                | Operator::PrefixContainsAny
                | Operator::PrefixNotContainsAny
                | Operator::SuffixContainsAny
                | Operator::SuffixNotContainsAny
        )
    }

    /// Returns true if this operator is the negation of a positive form
    pub fn is_negated(&self) -> bool {
        matches!(
            self,
            Operator::IsNotNull
                | Operator::Not
                | Operator::PrefixNotContains
                | Operator::SuffixNotContains
                | Operator::NotContains
                | Operator::NotAny
                | Operator::NotContainsAny
                | Operator::PrefixNotContainsAny
                | Operator::SuffixNotContainsAny
        )
    }

    /// String relation of the substring and `_ANY` families
    pub fn match_kind(&self) -> Option<MatchKind> {
        match self {
            Operator::IsAny | Operator::NotAny => Some(MatchKind::Exact),
            Operator::PrefixContains
            | Operator::PrefixNotContains
            | Operator::PrefixContainsAny
            | Operator::PrefixNotContainsAny => Some(MatchKind::Prefix),
            Operator::SuffixContains
            | Operator::SuffixNotContains
            | Operator::SuffixContainsAny
            | Operator::SuffixNotContainsAny => Some(MatchKind::Suffix),
            Operator::Contains
            | Operator::NotContains
            | Operator::ContainsAny
            | Operator::NotContainsAny => Some(MatchKind::Contains),
            _ => None,
        }
    }

    /// Day offset from today for the relative-date operators
    pub fn day_offset(&self) -> Option<i64> {
        match self {
            Operator::Today => Some(0),
            Operator::Yesterday => Some(-1),
            Operator::Tomorrow => Some(1),
            _ => None,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operator {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        Operator::ALL
            .iter()
            .copied()
            .find(|op| op.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CoreError::UnknownOperator(s.to_string()))
    }
}
