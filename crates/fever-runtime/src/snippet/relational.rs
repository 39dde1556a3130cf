//! Relational WHERE fragment generation
//!
//! Renders one parenthesised fragment per condition. Fragments are never
//! combined here. A pairing the dialect has no primitive for renders
//! [`Fragment::Unsupported`] instead of failing, so callers can drop it
//! before joining fragments with `AND`.

use super::fragment::{Fragment, SnippetMap};
use crate::error::RuntimeError;
use fever_core::{Condition, Operator, ValueType};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Supported SQL dialects
///
/// Deserializes through [`FromStr`], so `postgres` and `MySQL` are accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum RelationalDialect {
    #[default]
    MySql,
    PostgreSql,
    Sqlite,
}

impl RelationalDialect {
    pub fn as_str(&self) -> &'static str {
        match self {
            RelationalDialect::MySql => "mysql",
            RelationalDialect::PostgreSql => "postgresql",
            RelationalDialect::Sqlite => "sqlite",
        }
    }

    /// Quote a string literal
    fn quote(&self, raw: &str) -> String {
        let escaped = raw.replace('\'', "''");
        match self {
            // MySQL treats backslash as an escape inside string literals
            RelationalDialect::MySql => format!("'{}'", escaped.replace('\\', "\\\\")),
            _ => format!("'{}'", escaped),
        }
    }

    /// `column LIKE pattern`, escaping LIKE metacharacters in `raw`
    fn like(&self, column: &str, raw: &str, kind: LikeKind, negated: bool) -> String {
        let escaped = raw
            .replace('\\', "\\\\")
            .replace('%', "\\%")
            .replace('_', "\\_");
        let pattern = match kind {
            LikeKind::Prefix => format!("{}%", escaped),
            LikeKind::Suffix => format!("%{}", escaped),
            LikeKind::Contains => format!("%{}%", escaped),
        };
        let not = if negated { "NOT " } else { "" };
        // SQLite LIKE has no default escape character
        let escape_clause = match self {
            RelationalDialect::Sqlite if escaped != raw => " ESCAPE '\\'",
            _ => "",
        };
        format!(
            "({} {}LIKE {}{})",
            column,
            not,
            self.quote(&pattern),
            escape_clause
        )
    }

    /// Calendar day of `column` equals today shifted by `offset` days
    fn relative_day(&self, column: &str, offset: i64) -> String {
        match self {
            RelationalDialect::MySql => match offset {
                0 => format!("(DATE({}) = DATE(NOW()))", column),
                n if n < 0 => format!("(DATE({}) = DATE(NOW() - INTERVAL {} DAY))", column, -n),
                n => format!("(DATE({}) = DATE(NOW() + INTERVAL {} DAY))", column, n),
            },
            RelationalDialect::PostgreSql => match offset {
                0 => format!("(CAST({} AS DATE) = CURRENT_DATE)", column),
                n if n < 0 => format!(
                    "(CAST({} AS DATE) = CURRENT_DATE - INTERVAL '{} day')",
                    column, -n
                ),
                n => format!(
                    "(CAST({} AS DATE) = CURRENT_DATE + INTERVAL '{} day')",
                    column, n
                ),
            },
            RelationalDialect::Sqlite => match offset {
                0 => format!("(date({}) = date('now'))", column),
                n => format!("(date({}) = date('now', '{:+} day'))", column, n),
            },
        }
    }

    /// Membership test of one token in a comma separated column
    fn token_member(&self, column: &str, token: &str, negated: bool) -> String {
        match self {
            RelationalDialect::MySql => {
                let not = if negated { "NOT " } else { "" };
                format!("{}FIND_IN_SET({}, {})", not, self.quote(token), column)
            }
            RelationalDialect::PostgreSql => {
                let test = format!(
                    "{} = ANY(string_to_array({}, ','))",
                    self.quote(token),
                    column
                );
                if negated {
                    format!("NOT ({})", test)
                } else {
                    test
                }
            }
            RelationalDialect::Sqlite => {
                let cmp = if negated { "=" } else { ">" };
                format!(
                    "instr(',' || {} || ',', {}) {} 0",
                    column,
                    self.quote(&format!(",{},", token)),
                    cmp
                )
            }
        }
    }
}

impl fmt::Display for RelationalDialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RelationalDialect {
    type Err = RuntimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mysql" => Ok(RelationalDialect::MySql),
            "postgresql" | "postgres" => Ok(RelationalDialect::PostgreSql),
            "sqlite" => Ok(RelationalDialect::Sqlite),
            _ => Err(RuntimeError::UnsupportedDialect(s.to_string())),
        }
    }
}

impl TryFrom<String> for RelationalDialect {
    type Error = RuntimeError;

    fn try_from(tag: String) -> Result<Self, Self::Error> {
        tag.parse()
    }
}

#[derive(Debug, Clone, Copy)]
enum LikeKind {
    Prefix,
    Suffix,
    Contains,
}

/// Relational WHERE fragment generator for one dialect
#[derive(Debug, Clone, Copy, Default)]
pub struct RelationalGenerator {
    dialect: RelationalDialect,
}

impl RelationalGenerator {
    pub fn new(dialect: RelationalDialect) -> Self {
        Self { dialect }
    }

    pub fn dialect(&self) -> RelationalDialect {
        self.dialect
    }

    /// Render one fragment per condition, keyed by 1-based position.
    ///
    /// Identifiers are written into the SQL as-is and must be trusted column
    /// names; only operand literals are quoted.
    pub fn render(&self, conditions: &[Condition]) -> SnippetMap {
        SnippetMap::from_ordered(conditions.iter().enumerate().map(|(idx, c)| {
            let fragment = self.render_condition(c);
            if fragment.is_unsupported() {
                tracing::debug!(
                    "No {} fragment for condition {} ({} {} {})",
                    self.dialect,
                    idx + 1,
                    c.identifier,
                    c.value_type,
                    c.operator
                );
            }
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

        match self.render_sql(&condition) {
            Some(sql) => Fragment::Sql(sql),
            None => Fragment::Unsupported,
        }
    }

    fn render_sql(&self, c: &Condition) -> Option<String> {
        let column = c.identifier.as_str();
        let vt = c.value_type;
        let dialect = self.dialect;
        let literal = || {
            c.operand
                .as_ref()
                .map(|v| dialect.quote(&vt.format_literal(v)))
        };
        let raw = || c.operand.as_ref().map(|v| vt.format_literal(v));
        let folds_empty = matches!(vt, ValueType::Text | ValueType::LongText);

        let sql = match c.operator {
            Operator::Is => format!("({} = {})", column, literal()?),
            Operator::Not => format!("({} <> {})", column, literal()?),
            Operator::GreaterThan => format!("({} > {})", column, literal()?),
            Operator::GreaterThanEq => format!("({} >= {})", column, literal()?),
            Operator::LessThan => format!("({} < {})", column, literal()?),
            Operator::LessThanEq => format!("({} <= {})", column, literal()?),

            Operator::IsNull if folds_empty => format!("({0} IS NULL OR {0} = '')", column),
            Operator::IsNull => format!("({} IS NULL)", column),
            Operator::IsNotNull if folds_empty => {
                format!("({0} IS NOT NULL OR {0} <> '')", column)
            }
            Operator::IsNotNull => format!("({} IS NOT NULL)", column),

            Operator::Today | Operator::Yesterday | Operator::Tomorrow => {
                dialect.relative_day(column, c.operator.day_offset()?)
            }

            // Pattern matching is only indexed for short text columns
            op if op.is_substring() => {
                if vt != ValueType::Text {
                    return None;
                }
                let kind = match op {
                    Operator::PrefixContains | Operator::PrefixNotContains => LikeKind::Prefix,
                    Operator::SuffixContains | Operator::SuffixNotContains => LikeKind::Suffix,
                    _ => LikeKind::Contains,
                };
                dialect.like(column, &raw()?, kind, op.is_negated())
            }

            Operator::IsAny | Operator::NotAny => {
                let tokens = c.tokens();
                if tokens.is_empty() {
                    return None;
                }
                let negated = c.operator == Operator::NotAny;
                let joiner = if negated { " AND " } else { " OR " };
                let members: Vec<String> = tokens
                    .iter()
                    .map(|t| dialect.token_member(column, t, negated))
                    .collect();
                format!("({})", members.join(joiner))
            }

            // Substring tests over token sets have no relational primitive
            _ => return None,
        };
        Some(sql)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render_one(dialect: RelationalDialect, condition: Condition) -> String {
        RelationalGenerator::new(dialect)
            .render(&[condition])
            .get(1)
            .map(Fragment::as_text)
            .unwrap_or_default()
    }

    fn cond(vt: ValueType, op: Operator, operand: &str) -> Condition {
        Condition::try_new("c", vt, op, operand).unwrap()
    }

    #[test]
    fn test_quote_escaping() {
        assert_eq!(
            render_one(RelationalDialect::MySql, cond(ValueType::Text, Operator::Is, "O'Brien\\")),
            "(c = 'O''Brien\\\\')"
        );
        assert_eq!(
            render_one(RelationalDialect::PostgreSql, cond(ValueType::Text, Operator::Is, "O'Brien\\")),
            "(c = 'O''Brien\\')"
        );
    }

    #[test]
    fn test_like_escapes_wildcards() {
        assert_eq!(
            render_one(RelationalDialect::PostgreSql, cond(ValueType::Text, Operator::Contains, "50%")),
            "(c LIKE '%50\\%%')"
        );
        assert_eq!(
            render_one(RelationalDialect::Sqlite, cond(ValueType::Text, Operator::PrefixContains, "a_b")),
            "(c LIKE 'a\\_b%' ESCAPE '\\')"
        );
        assert_eq!(
            render_one(RelationalDialect::Sqlite, cond(ValueType::Text, Operator::PrefixContains, "ab")),
            "(c LIKE 'ab%')"
        );
    }

    #[test]
    fn test_postgres_relative_dates_and_tokens() {
        let pg = RelationalDialect::PostgreSql;
        assert_eq!(
            render_one(pg, Condition::nullary("t", ValueType::Time, Operator::Yesterday)),
            "(CAST(t AS DATE) = CURRENT_DATE - INTERVAL '1 day')"
        );
        assert_eq!(
            render_one(pg, cond(ValueType::CommaSplit, Operator::NotAny, "1,2")),
            "(NOT ('1' = ANY(string_to_array(c, ','))) AND NOT ('2' = ANY(string_to_array(c, ','))))"
        );
    }

    #[test]
    fn test_sqlite_relative_dates_and_tokens() {
        let lite = RelationalDialect::Sqlite;
        assert_eq!(
            render_one(lite, Condition::nullary("t", ValueType::Time, Operator::Tomorrow)),
            "(date(t) = date('now', '+1 day'))"
        );
        assert_eq!(
            render_one(lite, Condition::nullary("t", ValueType::Time, Operator::Yesterday)),
            "(date(t) = date('now', '-1 day'))"
        );
        assert_eq!(
            render_one(lite, cond(ValueType::CommaSplit, Operator::IsAny, "a")),
            "(instr(',' || c || ',', ',a,') > 0)"
        );
    }

    #[test]
    fn test_empty_token_list_is_unsupported() {
        let c = Condition::new(
            "c",
            ValueType::CommaSplit,
            Operator::IsAny,
            Some(fever_core::Value::from(" , ")),
        );
        let map = RelationalGenerator::default().render(&[c]);
        assert_eq!(map.get(1), Some(&Fragment::Unsupported));
    }

    #[test]
    fn test_malformed_operand_renders_unsupported() {
        let c = Condition::new(
            "n",
            ValueType::Numeric,
            Operator::Is,
            Some(fever_core::Value::from("one")),
        );
        let map = RelationalGenerator::default().render(&[c]);
        assert!(map.get(1).unwrap().is_unsupported());
    }

    #[test]
    fn test_dialect_from_str() {
        assert_eq!("MySQL".parse::<RelationalDialect>().unwrap(), RelationalDialect::MySql);
        assert_eq!("postgres".parse::<RelationalDialect>().unwrap(), RelationalDialect::PostgreSql);
        assert!(matches!(
            "oracle".parse::<RelationalDialect>(),
            Err(RuntimeError::UnsupportedDialect(_))
        ));
    }

    #[test]
    fn test_dialect_deserializes_aliases() {
        let dialects: Vec<RelationalDialect> =
            serde_json::from_str(r#"["postgres", "MySQL", "sqlite"]"#).unwrap();
        assert_eq!(
            dialects,
            vec![RelationalDialect::PostgreSql, RelationalDialect::MySql, RelationalDialect::Sqlite]
        );
        assert_eq!(
            serde_json::to_string(&RelationalDialect::PostgreSql).unwrap(),
            r#""postgresql""#
        );
        assert!(serde_json::from_str::<RelationalDialect>(r#""oracle""#).is_err());
    }
}
