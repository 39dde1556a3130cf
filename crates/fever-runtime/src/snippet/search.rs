//! Search engine query generation
//!
//! Renders one Elasticsearch query DSL document per condition. Unlike the
//! relational generator every operator/value-type pairing of the catalogue
//! has an expression here, including pattern matching on long text and the
//! substring forms of the token-set family.

use super::fragment::{Fragment, SnippetMap};
use crate::clock::format_offset;
use chrono::{FixedOffset, Offset, Timelike, Utc};
use fever_core::{Condition, MatchKind, Operator, Value, ValueType};
use serde_json::{json, Map, Value as Json};

/// Date format used for `TIME` range bounds
const SEARCH_TIME_FORMAT: &str = "yyyy-MM-dd HH:mm:ss";

/// Range bound format for times with fractional seconds
const SEARCH_FRACTION_FORMAT: &str = "yyyy-MM-dd HH:mm:ss.SSSSSSSSS";

/// Search query generator
#[derive(Debug, Clone)]
pub struct SearchGenerator {
    zone: FixedOffset,
}

impl Default for SearchGenerator {
    fn default() -> Self {
        Self::new(Utc.fix())
    }
}

impl SearchGenerator {
    /// Generator whose relative-date ranges are rounded in `zone`
    pub fn new(zone: FixedOffset) -> Self {
        Self { zone }
    }

    /// Render one query document per condition, keyed by 1-based position
    pub fn render(&self, conditions: &[Condition]) -> SnippetMap {
        SnippetMap::from_ordered(conditions.iter().enumerate().map(|(idx, c)| {
            let fragment = self.render_condition(c);
            tracing::debug!(
                "Search fragment {} for {} {}: {:?}",
                idx + 1,
                c.identifier,
                c.operator,
                fragment
            );
            fragment
        }))
    }

    /// Render a single condition
    pub fn render_condition(&self, condition: &Condition) -> Fragment {
        if !condition.is_supported() {
            return Fragment::Unsupported;
        }
        let condition = match condition.clone().normalized() {
            Ok(c) => c,
            Err(e) => {
                tracing::warn!("Skipping condition on '{}': {}", condition.identifier, e);
                return Fragment::Unsupported;
            }
        };

        match self.render_query(&condition) {
            Some(doc) => Fragment::Search(doc),
            None => Fragment::Unsupported,
        }
    }

    fn render_query(&self, c: &Condition) -> Option<Json> {
        let field = c.identifier.as_str();
        let operand = || c.operand.as_ref().map(to_json);
        let text = || {
            c.operand
                .as_ref()
                .map(|v| c.value_type.format_literal(v))
        };
        let folds_empty = matches!(c.value_type, ValueType::Text | ValueType::LongText);

        let query = match c.operator {
            Operator::Is => term(field, operand()?),
            Operator::Not => must_not(vec![term(field, operand()?)]),

            Operator::GreaterThan => self.range(c, "gt", operand()?),
            Operator::GreaterThanEq => self.range(c, "gte", operand()?),
            Operator::LessThan => self.range(c, "lt", operand()?),
            Operator::LessThanEq => self.range(c, "lte", operand()?),

            Operator::IsNull if folds_empty => json!({
                "bool": {
                    "should": [must_not(vec![exists(field)]), term(field, json!(""))],
                    "minimum_should_match": 1
                }
            }),
            Operator::IsNull => must_not(vec![exists(field)]),
            Operator::IsNotNull => exists(field),

            Operator::Today | Operator::Yesterday | Operator::Tomorrow => {
                let offset = c.operator.day_offset()?;
                keyed(
                    "range",
                    keyed(
                        field,
                        json!({
                            "gte": date_math(offset),
                            "lt": date_math(offset + 1),
                            "time_zone": format_offset(&self.zone)
                        }),
                    ),
                )
            }

            op if op.is_substring() => {
                let leaf = pattern(field, op.match_kind()?, &text()?);
                if op.is_negated() {
                    must_not(vec![leaf])
                } else {
                    leaf
                }
            }

            op if op.is_multi_value() => {
                let kind = op.match_kind()?;
                let leaves: Vec<Json> = c
                    .tokens()
                    .into_iter()
                    .map(|t| pattern(field, kind, t))
                    .collect();
                if leaves.is_empty() {
                    return None;
                }
                if op.is_negated() {
                    must_not(leaves)
                } else {
                    json!({"bool": {"should": leaves, "minimum_should_match": 1}})
                }
            }

            _ => return None,
        };
        Some(query)
    }

    fn range(&self, c: &Condition, bound: &str, value: Json) -> Json {
        let mut body = Map::new();
        match &c.operand {
            Some(Value::Time(t)) if t.nanosecond() != 0 => {
                let fixed = t.format("%Y-%m-%d %H:%M:%S%.9f").to_string();
                body.insert(bound.to_string(), json!(fixed));
                body.insert("format".to_string(), json!(SEARCH_FRACTION_FORMAT));
            }
            Some(Value::Time(_)) => {
                body.insert(bound.to_string(), value);
                body.insert("format".to_string(), json!(SEARCH_TIME_FORMAT));
            }
            _ => {
                body.insert(bound.to_string(), value);
            }
        }
        keyed("range", keyed(&c.identifier, Json::Object(body)))
    }
}

fn keyed(key: &str, inner: Json) -> Json {
    let mut map = Map::new();
    map.insert(key.to_string(), inner);
    Json::Object(map)
}

fn term(field: &str, value: Json) -> Json {
    keyed("term", keyed(field, json!({ "value": value })))
}

fn exists(field: &str) -> Json {
    json!({"exists": {"field": field}})
}

fn must_not(queries: Vec<Json>) -> Json {
    json!({"bool": {"must_not": queries}})
}

/// Leaf query testing `field` against `raw` with the given relation
fn pattern(field: &str, kind: MatchKind, raw: &str) -> Json {
    match kind {
        MatchKind::Exact => term(field, json!(raw)),
        MatchKind::Prefix => keyed("prefix", keyed(field, json!({ "value": raw }))),
        MatchKind::Suffix => wildcard(field, format!("*{}", escape_wildcard(raw))),
        MatchKind::Contains => wildcard(field, format!("*{}*", escape_wildcard(raw))),
    }
}

fn wildcard(field: &str, value: String) -> Json {
    keyed("wildcard", keyed(field, json!({ "value": value })))
}

fn escape_wildcard(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        if matches!(ch, '*' | '?' | '\\') {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}

/// `now/d` shifted by whole days
fn date_math(offset_days: i64) -> String {
    if offset_days == 0 {
        "now/d".to_string()
    } else {
        format!("now{:+}d/d", offset_days)
    }
}

fn to_json(value: &Value) -> Json {
    match value {
        Value::Null => Json::Null,
        Value::Number(n) => json!(n),
        Value::Text(s) => json!(s),
        Value::Time(_) => json!(ValueType::Time.format_literal(value)),
    }
}
