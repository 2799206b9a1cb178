//! Search and ranking types
//!
//! A query orders its results in exactly one way: full-text BM25, vector
//! nearest-neighbour, or (when no search is configured) a plain attribute sort.

use serde::{Deserialize, Serialize};

use crate::core::config::DEFAULT_SORT_ATTRIBUTE;

#[cfg(test)]
use proptest_derive::Arbitrary;

/// Relevance search mode of a query
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum SearchConfig {
    /// Full-text search over one or more text attributes
    Bm25 { bm25: Bm25Search },
    /// Approximate nearest-neighbour search over a vector attribute
    Vector { vector: VectorSearch },
}

impl SearchConfig {
    pub fn bm25(fields: Vec<Bm25Field>, query: impl Into<String>, operator: Bm25Combiner) -> Self {
        SearchConfig::Bm25 {
            bm25: Bm25Search {
                fields,
                query: query.into(),
                operator,
            },
        }
    }

    pub fn vector(field: impl Into<String>, query_vector: Vec<f64>) -> Self {
        SearchConfig::Vector {
            vector: VectorSearch {
                field: field.into(),
                query_vector,
                encoding: VectorEncoding::default(),
            },
        }
    }

    /// Mode name as shown in the query builder
    pub fn mode(&self) -> &'static str {
        match self {
            SearchConfig::Bm25 { .. } => "bm25",
            SearchConfig::Vector { .. } => "vector",
        }
    }
}

/// Full-text search settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Bm25Search {
    pub fields: Vec<Bm25Field>,
    pub query: String,
    #[serde(default)]
    pub operator: Bm25Combiner,
}

/// One full-text field, optionally weighted
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Bm25Field {
    pub field: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
}

impl Bm25Field {
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            weight: None,
        }
    }

    pub fn weighted(field: impl Into<String>, weight: f64) -> Self {
        Self {
            field: field.into(),
            weight: Some(weight),
        }
    }
}

/// How per-field BM25 scores are combined
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[cfg_attr(test, derive(Arbitrary))]
#[serde(rename_all = "lowercase")]
pub enum Bm25Combiner {
    #[default]
    Sum,
    Max,
    Product,
}

/// Vector search settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VectorSearch {
    pub field: String,
    pub query_vector: Vec<f64>,
    #[serde(default)]
    pub encoding: VectorEncoding,
}

/// Encoding the UI requests for returned vectors
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[cfg_attr(test, derive(Arbitrary))]
#[serde(rename_all = "lowercase")]
pub enum VectorEncoding {
    #[default]
    Float,
    Base64,
}

/// Sort direction for attribute ordering
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[cfg_attr(test, derive(Arbitrary))]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "asc" => Some(SortDirection::Asc),
            "desc" => Some(SortDirection::Desc),
            _ => None,
        }
    }
}

/// Ordering applied when no relevance search is configured
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum RankingConfig {
    Simple {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        attribute: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        direction: Option<SortDirection>,
    },
}

impl RankingConfig {
    pub fn simple(attribute: impl Into<String>, direction: SortDirection) -> Self {
        RankingConfig::Simple {
            attribute: Some(attribute.into()),
            direction: Some(direction),
        }
    }

    /// Sort attribute with the `id` default applied
    pub fn attribute(&self) -> &str {
        match self {
            RankingConfig::Simple { attribute, .. } => {
                attribute.as_deref().unwrap_or(DEFAULT_SORT_ATTRIBUTE)
            }
        }
    }

    /// Sort direction with the ascending default applied
    pub fn direction(&self) -> SortDirection {
        match self {
            RankingConfig::Simple { direction, .. } => direction.unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_search_config_json_shape() {
        let search = SearchConfig::bm25(
            vec![Bm25Field::weighted("title", 2.0), Bm25Field::new("body")],
            "hello",
            Bm25Combiner::Max,
        );
        assert_eq!(
            serde_json::to_value(&search).unwrap(),
            json!({
                "mode": "bm25",
                "bm25": {
                    "fields": [{"field": "title", "weight": 2.0}, {"field": "body"}],
                    "query": "hello",
                    "operator": "max"
                }
            })
        );
        assert_eq!(search.mode(), "bm25");
    }

    #[test]
    fn test_bm25_operator_defaults_to_sum() {
        let search: SearchConfig = serde_json::from_value(json!({
            "mode": "bm25",
            "bm25": {"fields": [{"field": "text"}], "query": "q"}
        }))
        .unwrap();
        match search {
            SearchConfig::Bm25 { bm25 } => assert_eq!(bm25.operator, Bm25Combiner::Sum),
            other => panic!("unexpected search {:?}", other),
        }
    }

    #[test]
    fn test_ranking_defaults() {
        let ranking: RankingConfig = serde_json::from_value(json!({"type": "simple"})).unwrap();
        assert_eq!(ranking.attribute(), "id");
        assert_eq!(ranking.direction(), SortDirection::Asc);
    }

    #[test]
    fn test_sort_direction_parse() {
        assert_eq!(SortDirection::parse("desc"), Some(SortDirection::Desc));
        assert_eq!(SortDirection::parse("DESC"), None);
        assert_eq!(SortDirection::Asc.as_str(), "asc");
    }
}
