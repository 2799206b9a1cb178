//! Aggregation types

use serde::{Deserialize, Serialize};

use super::filter::new_node_id;

/// Aggregation function
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum AggregationKind {
    #[default]
    Count,
}

/// Group documents by attribute values and count each group
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AggregationConfig {
    pub id: String,
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: AggregationKind,
    #[serde(default)]
    pub group_by: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_k: Option<u32>,
}

impl AggregationConfig {
    pub fn count(name: impl Into<String>, group_by: Vec<String>) -> Self {
        Self {
            id: new_node_id(),
            name: name.into(),
            kind: AggregationKind::Count,
            group_by,
            top_k: None,
        }
    }

    pub fn with_top_k(mut self, top_k: u32) -> Self {
        self.top_k = Some(top_k);
        self
    }
}
