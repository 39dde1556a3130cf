//! Rendered fragments and the position-keyed result mapping

use serde::Serialize;
use std::collections::BTreeMap;

/// Rendered form of one condition for one backend
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Fragment {
    /// Relational WHERE fragment, e.g. `(text = 'text')`
    Sql(String),
    /// Search engine query document
    Search(serde_json::Value),
    /// The backend has no expression for this condition
    Unsupported,
}

impl Fragment {
    pub fn is_unsupported(&self) -> bool {
        matches!(self, Fragment::Unsupported)
    }

    pub fn as_sql(&self) -> Option<&str> {
        match self {
            Fragment::Sql(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_search(&self) -> Option<&serde_json::Value> {
        match self {
            Fragment::Search(doc) => Some(doc),
            _ => None,
        }
    }

    /// Text form: SQL as-is, search documents as compact JSON, unsupported
    /// fragments as the empty string
    pub fn as_text(&self) -> String {
        match self {
            Fragment::Sql(s) => s.clone(),
            Fragment::Search(doc) => doc.to_string(),
            Fragment::Unsupported => String::new(),
        }
    }
}

/// Ordered mapping from 1-based input position to fragment
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct SnippetMap(BTreeMap<usize, Fragment>);

impl SnippetMap {
    /// Build from fragments in input order; positions start at 1
    pub fn from_ordered(fragments: impl IntoIterator<Item = Fragment>) -> Self {
        Self(
            fragments
                .into_iter()
                .enumerate()
                .map(|(idx, fragment)| (idx + 1, fragment))
                .collect(),
        )
    }

    pub fn get(&self, position: usize) -> Option<&Fragment> {
        self.0.get(&position)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &Fragment)> {
        self.0.iter().map(|(pos, fragment)| (*pos, fragment))
    }

    /// Position to text mapping, unsupported fragments as `""`
    pub fn to_strings(&self) -> BTreeMap<usize, String> {
        self.iter().map(|(pos, f)| (pos, f.as_text())).collect()
    }

    /// Supported relational fragments joined with `AND`, `None` if there are none
    pub fn conjunction(&self) -> Option<String> {
        let parts: Vec<&str> = self.0.values().filter_map(Fragment::as_sql).collect();
        if parts.is_empty() {
            None
        } else {
            Some(parts.join(" AND "))
        }
    }

    pub fn into_inner(self) -> BTreeMap<usize, Fragment> {
        self.0
    }
}

impl IntoIterator for SnippetMap {
    type Item = (usize, Fragment);
    type IntoIter = std::collections::btree_map::IntoIter<usize, Fragment>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_positions_start_at_one() {
        let map = SnippetMap::from_ordered(vec![
            Fragment::Sql("(a = '1')".to_string()),
            Fragment::Unsupported,
        ]);
        assert_eq!(map.len(), 2);
        assert_eq!(map.get(0), None);
        assert_eq!(map.get(1), Some(&Fragment::Sql("(a = '1')".to_string())));
        assert_eq!(map.get(2), Some(&Fragment::Unsupported));
    }

    #[test]
    fn test_to_strings_keeps_legacy_empty_fragment() {
        let map = SnippetMap::from_ordered(vec![
            Fragment::Unsupported,
            Fragment::Search(json!({"exists": {"field": "a"}})),
        ]);
        let strings = map.to_strings();
        assert_eq!(strings[&1], "");
        assert_eq!(strings[&2], r#"{"exists":{"field":"a"}}"#);
    }

    #[test]
    fn test_conjunction_drops_unsupported() {
        let map = SnippetMap::from_ordered(vec![
            Fragment::Sql("(a = '1')".to_string()),
            Fragment::Unsupported,
            Fragment::Sql("(b IS NULL)".to_string()),
        ]);
        assert_eq!(map.conjunction().as_deref(), Some("(a = '1') AND (b IS NULL)"));
        assert_eq!(SnippetMap::from_ordered(vec![Fragment::Unsupported]).conjunction(), None);
    }
}
