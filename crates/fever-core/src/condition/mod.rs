//! Condition Module
//!
//! A condition is the unit every evaluation target consumes:
//!
//! ```text
//! (identifier, value type, operator, operand, secondary operand)
//! ```
//!
//! The same condition can be evaluated against an in-memory record, rendered
//! into a relational WHERE fragment or rendered into a search query document.
//!
//! ## Operator families
//! - null checks: `IS_NULL`, `IS_NOT_NULL`
//! - relative dates (TIME only): `TODAY`, `YESTERDAY`, `TOMORROW`
//! - equality: `IS`, `NOT`
//! - ordering (NUMERIC, TIME): `GREATER_THAN`, `GREATER_THAN_EQ`, `LESS_THAN`, `LESS_THAN_EQ`
//! - substring (text kinds): `PREFIX_CONTAINS`, `SUFFIX_CONTAINS`, `CONTAINS` and their `NOT` forms
//! - token sets (COMMA_SPLIT only): `IS_ANY`, `NOT_ANY`, `CONTAINS_ANY`, ... and their `NOT` forms
//!
//! Which operator applies to which value type is defined once, in
//! [`catalogue`].

pub mod catalogue;
mod operator;
mod types;

pub use operator::{Arity, MatchKind, Operator};
pub use types::Condition;
