//! Aggregation → wire form
//!
//! Aggregations run as their own request and never carry the query's filters.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::config::COUNT_ATTRIBUTE;
use crate::core::types::{AggregationConfig, AggregationKind};

/// Aggregation request sent to the vector database
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireAggregation {
    /// Output name → aggregate function, e.g. `{"count": ["Count", "id"]}`
    pub aggregate_by: BTreeMap<String, Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_by: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_k: Option<u32>,
}

pub fn to_wire_aggregation(aggregation: &AggregationConfig) -> WireAggregation {
    let function = match aggregation.kind {
        AggregationKind::Count => Value::Array(vec![
            Value::String("Count".to_string()),
            Value::String(COUNT_ATTRIBUTE.to_string()),
        ]),
    };

    let mut aggregate_by = BTreeMap::new();
    aggregate_by.insert(aggregation.name.clone(), function);

    WireAggregation {
        aggregate_by,
        group_by: (!aggregation.group_by.is_empty()).then(|| aggregation.group_by.clone()),
        top_k: aggregation.top_k,
    }
}
