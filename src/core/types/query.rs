//! Unified query types
//!
//! [`UnifiedQuery`] is the aggregate root edited by the query builder and
//! handed to the converter right before execution.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::aggregation::AggregationConfig;
use super::filter::{new_node_id, FilterNode};
use super::search::{RankingConfig, SearchConfig};
use crate::core::config::{DEFAULT_TOP_K, QUERY_MODEL_VERSION};

/// Builder-facing query representation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UnifiedQuery {
    pub id: String,

    #[serde(default = "default_version")]
    pub version: u32,

    #[serde(default)]
    pub search: Option<SearchConfig>,

    /// Top-level filters, implicitly ANDed
    #[serde(default)]
    pub filters: Vec<FilterNode>,

    #[serde(default)]
    pub ranking: Option<RankingConfig>,

    #[serde(default)]
    pub results: ResultOptions,

    #[serde(default)]
    pub aggregations: Vec<AggregationConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub consistency: Option<Consistency>,

    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,

    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

fn default_version() -> u32 {
    QUERY_MODEL_VERSION
}

fn default_top_k() -> u32 {
    DEFAULT_TOP_K
}

/// What the query returns for each matching document
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ResultOptions {
    #[serde(default = "default_top_k")]
    pub top_k: u32,

    /// Attributes to return; empty means the service default
    #[serde(default)]
    pub include_attributes: Vec<String>,

    #[serde(default)]
    pub include_vectors: bool,

    /// Whether to return the distance or score of each result
    #[serde(default)]
    pub include_dist: bool,
}

impl Default for ResultOptions {
    fn default() -> Self {
        Self {
            top_k: DEFAULT_TOP_K,
            include_attributes: Vec::new(),
            include_vectors: false,
            include_dist: false,
        }
    }
}

/// Read consistency requested from the service
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Consistency {
    pub level: String,
}

impl Consistency {
    pub fn strong() -> Self {
        Self {
            level: "strong".to_string(),
        }
    }

    pub fn eventual() -> Self {
        Self {
            level: "eventual".to_string(),
        }
    }
}

impl Default for UnifiedQuery {
    fn default() -> Self {
        let now = Utc::now();
        Self {
            id: new_node_id(),
            version: QUERY_MODEL_VERSION,
            search: None,
            filters: Vec::new(),
            ranking: None,
            results: ResultOptions::default(),
            aggregations: Vec::new(),
            consistency: None,
            created_at: now,
            updated_at: now,
        }
    }
}

impl UnifiedQuery {
    /// Start an empty query: no search, no filters, default sort
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, search: SearchConfig) -> Self {
        self.search = Some(search);
        self
    }

    pub fn with_filter(mut self, filter: FilterNode) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn with_filters(mut self, filters: Vec<FilterNode>) -> Self {
        self.filters = filters;
        self
    }

    pub fn with_ranking(mut self, ranking: RankingConfig) -> Self {
        self.ranking = Some(ranking);
        self
    }

    pub fn with_top_k(mut self, top_k: u32) -> Self {
        self.results.top_k = top_k;
        self
    }

    pub fn with_consistency(mut self, consistency: Consistency) -> Self {
        self.consistency = Some(consistency);
        self
    }

    pub fn with_aggregation(mut self, aggregation: AggregationConfig) -> Self {
        self.aggregations.push(aggregation);
        self
    }

    /// Mark the query as edited now
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
