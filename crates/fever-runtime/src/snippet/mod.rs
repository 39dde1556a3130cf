//! Query Fragment Generation
//!
//! Renders conditions for persisted evaluation:
//! - Relational stores (MySQL, PostgreSQL, SQLite) - WHERE fragments
//! - Search engines (Elasticsearch) - query DSL documents
//!
//! Each generator returns one fragment per input condition keyed by its
//! 1-based position. The [`Dispatcher`] selects the generator by backend.

mod fragment;
mod relational;
mod search;

pub use fragment::{Fragment, SnippetMap};
pub use relational::{RelationalDialect, RelationalGenerator};
pub use search::SearchGenerator;

use crate::error::{Result, RuntimeError};
use chrono::FixedOffset;
use fever_core::Condition;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Target store for persisted evaluation
///
/// Deserializes through [`FromStr`], so configuration accepts the same tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Backend {
    #[default]
    Relational,
    Search,
}

impl Backend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Backend::Relational => "relational",
            Backend::Search => "search",
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Backend {
    type Err = RuntimeError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "relational" | "sql" | "mysql" => Ok(Backend::Relational),
            "search" | "elasticsearch" | "es" => Ok(Backend::Search),
            _ => Err(RuntimeError::UnsupportedBackend(s.to_string())),
        }
    }
}

impl TryFrom<String> for Backend {
    type Error = RuntimeError;

    fn try_from(tag: String) -> Result<Self> {
        tag.parse()
    }
}

/// Selects the relational or search generator by backend
#[derive(Debug, Clone, Default)]
pub struct Dispatcher {
    relational: RelationalGenerator,
    search: SearchGenerator,
}

impl Dispatcher {
    pub fn new(dialect: RelationalDialect, zone: FixedOffset) -> Self {
        Self {
            relational: RelationalGenerator::new(dialect),
            search: SearchGenerator::new(zone),
        }
    }

    pub fn dialect(&self) -> RelationalDialect {
        self.relational.dialect()
    }

    /// Render every condition for `backend`
    pub fn render(&self, backend: Backend, conditions: &[Condition]) -> SnippetMap {
        tracing::debug!("Rendering {} conditions for {}", conditions.len(), backend);
        match backend {
            Backend::Relational => self.relational.render(conditions),
            Backend::Search => self.search.render(conditions),
        }
    }

    /// Render for a backend given by tag; unknown tags fail
    pub fn render_tagged(&self, tag: &str, conditions: &[Condition]) -> Result<SnippetMap> {
        let backend = tag.parse::<Backend>()?;
        Ok(self.render(backend, conditions))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fever_core::{Operator, ValueType};

    #[test]
    fn test_backend_from_str() {
        assert_eq!("RELATIONAL".parse::<Backend>().unwrap(), Backend::Relational);
        assert_eq!("elasticsearch".parse::<Backend>().unwrap(), Backend::Search);
        assert_eq!(
            "mongodb".parse::<Backend>(),
            Err(RuntimeError::UnsupportedBackend("mongodb".to_string()))
        );
    }

    #[test]
    fn test_backend_deserializes_aliases() {
        let backends: Vec<Backend> = serde_json::from_str(r#"["ES", "sql", "Search"]"#).unwrap();
        assert_eq!(backends, vec![Backend::Search, Backend::Relational, Backend::Search]);
        assert_eq!(serde_json::to_string(&Backend::Search).unwrap(), r#""search""#);

        let err = serde_json::from_str::<Backend>(r#""mongodb""#).unwrap_err();
        assert!(err.to_string().contains("Unsupported backend: mongodb"));
    }

    #[test]
    fn test_dispatch_selects_generator() {
        let conditions = vec![Condition::nullary("n", ValueType::Numeric, Operator::IsNull)];
        let dispatcher = Dispatcher::default();

        let sql = dispatcher.render(Backend::Relational, &conditions);
        assert_eq!(sql.get(1).and_then(Fragment::as_sql), Some("(n IS NULL)"));

        let search = dispatcher.render(Backend::Search, &conditions);
        assert!(search.get(1).and_then(Fragment::as_search).is_some());
    }

    #[test]
    fn test_render_tagged_rejects_unknown_backend() {
        let err = Dispatcher::default().render_tagged("redis", &[]).unwrap_err();
        assert_eq!(err.to_string(), "Unsupported backend: redis");
    }
}
