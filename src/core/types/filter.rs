//! Filter algebra types
//!
//! A filter is a forest of [`FilterNode`]s that is implicitly ANDed at the top
//! level. Leaves compare one attribute against a value, composite nodes combine
//! their children with AND, OR or NOT.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

#[cfg(test)]
use proptest_derive::Arbitrary;

/// Generate a fresh node identifier (UUID v7, time-ordered)
pub fn new_node_id() -> String {
    Uuid::now_v7().to_string()
}

/// Comparison operator offered by the filter builder
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[cfg_attr(test, derive(Arbitrary))]
#[serde(rename_all = "snake_case")]
pub enum FilterOperator {
    Equals,
    NotEquals,
    Contains,
    NotContains,
    ContainsAny,
    Greater,
    GreaterOrEqual,
    Less,
    LessOrEqual,
    In,
    NotIn,
    Matches,
    NotMatches,
    Imatches,
    NotImatches,
    Regex,
    AnyLt,
    AnyGt,
}

impl FilterOperator {
    /// Every operator, in builder display order
    pub const ALL: [FilterOperator; 18] = [
        FilterOperator::Equals,
        FilterOperator::NotEquals,
        FilterOperator::Contains,
        FilterOperator::NotContains,
        FilterOperator::ContainsAny,
        FilterOperator::Greater,
        FilterOperator::GreaterOrEqual,
        FilterOperator::Less,
        FilterOperator::LessOrEqual,
        FilterOperator::In,
        FilterOperator::NotIn,
        FilterOperator::Matches,
        FilterOperator::NotMatches,
        FilterOperator::Imatches,
        FilterOperator::NotImatches,
        FilterOperator::Regex,
        FilterOperator::AnyLt,
        FilterOperator::AnyGt,
    ];

    /// Operator name as stored in saved queries
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterOperator::Equals => "equals",
            FilterOperator::NotEquals => "not_equals",
            FilterOperator::Contains => "contains",
            FilterOperator::NotContains => "not_contains",
            FilterOperator::ContainsAny => "contains_any",
            FilterOperator::Greater => "greater",
            FilterOperator::GreaterOrEqual => "greater_or_equal",
            FilterOperator::Less => "less",
            FilterOperator::LessOrEqual => "less_or_equal",
            FilterOperator::In => "in",
            FilterOperator::NotIn => "not_in",
            FilterOperator::Matches => "matches",
            FilterOperator::NotMatches => "not_matches",
            FilterOperator::Imatches => "imatches",
            FilterOperator::NotImatches => "not_imatches",
            FilterOperator::Regex => "regex",
            FilterOperator::AnyLt => "any_lt",
            FilterOperator::AnyGt => "any_gt",
        }
    }

    /// Whether the operator expects a list of values
    pub fn takes_list(&self) -> bool {
        matches!(self, FilterOperator::In | FilterOperator::NotIn)
    }
}

impl std::fmt::Display for FilterOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Right-hand side of a leaf comparison: one scalar or a list of scalars
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum FilterValue {
    Many(Vec<Value>),
    One(Value),
}

impl FilterValue {
    /// First scalar of the value. A single scalar is its own first element;
    /// an empty list yields `Null`.
    pub fn first(&self) -> Value {
        match self {
            FilterValue::One(v) => v.clone(),
            FilterValue::Many(values) => values.first().cloned().unwrap_or(Value::Null),
        }
    }

    /// The value as a list, wrapping a scalar in a one-element list
    pub fn to_list(&self) -> Vec<Value> {
        match self {
            FilterValue::One(v) => vec![v.clone()],
            FilterValue::Many(values) => values.clone(),
        }
    }

    /// The value as it appears on the wire, unchanged
    pub fn to_value(&self) -> Value {
        match self {
            FilterValue::One(v) => v.clone(),
            FilterValue::Many(values) => Value::Array(values.clone()),
        }
    }

    pub fn is_list(&self) -> bool {
        matches!(self, FilterValue::Many(_))
    }
}

impl From<Value> for FilterValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Array(values) => FilterValue::Many(values),
            other => FilterValue::One(other),
        }
    }
}

impl From<&str> for FilterValue {
    fn from(value: &str) -> Self {
        FilterValue::One(Value::String(value.to_string()))
    }
}

impl From<String> for FilterValue {
    fn from(value: String) -> Self {
        FilterValue::One(Value::String(value))
    }
}

impl From<i64> for FilterValue {
    fn from(value: i64) -> Self {
        FilterValue::One(Value::from(value))
    }
}

impl From<f64> for FilterValue {
    fn from(value: f64) -> Self {
        FilterValue::One(Value::from(value))
    }
}

impl From<bool> for FilterValue {
    fn from(value: bool) -> Self {
        FilterValue::One(Value::Bool(value))
    }
}

impl From<Vec<Value>> for FilterValue {
    fn from(values: Vec<Value>) -> Self {
        FilterValue::Many(values)
    }
}

/// Node of the filter expression tree
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FilterNode {
    /// Leaf comparison of one attribute against a value
    Simple {
        id: String,
        attribute: String,
        operator: FilterOperator,
        value: FilterValue,
    },
    And {
        id: String,
        children: Vec<FilterNode>,
    },
    Or {
        id: String,
        children: Vec<FilterNode>,
    },
    /// Negation. Holds exactly one child by convention.
    Not {
        id: String,
        children: Vec<FilterNode>,
    },
}

impl FilterNode {
    /// Create a leaf comparison with a fresh id
    pub fn simple(
        attribute: impl Into<String>,
        operator: FilterOperator,
        value: impl Into<FilterValue>,
    ) -> Self {
        FilterNode::Simple {
            id: new_node_id(),
            attribute: attribute.into(),
            operator,
            value: value.into(),
        }
    }

    pub fn and(children: Vec<FilterNode>) -> Self {
        FilterNode::And {
            id: new_node_id(),
            children,
        }
    }

    pub fn or(children: Vec<FilterNode>) -> Self {
        FilterNode::Or {
            id: new_node_id(),
            children,
        }
    }

    pub fn not(child: FilterNode) -> Self {
        FilterNode::Not {
            id: new_node_id(),
            children: vec![child],
        }
    }

    /// Replace the generated id, mostly useful for fixtures
    pub fn with_id(mut self, new_id: impl Into<String>) -> Self {
        match &mut self {
            FilterNode::Simple { id, .. }
            | FilterNode::And { id, .. }
            | FilterNode::Or { id, .. }
            | FilterNode::Not { id, .. } => *id = new_id.into(),
        }
        self
    }

    pub fn id(&self) -> &str {
        match self {
            FilterNode::Simple { id, .. }
            | FilterNode::And { id, .. }
            | FilterNode::Or { id, .. }
            | FilterNode::Not { id, .. } => id,
        }
    }

    /// Children of a composite node, empty for leaves
    pub fn children(&self) -> &[FilterNode] {
        match self {
            FilterNode::Simple { .. } => &[],
            FilterNode::And { children, .. }
            | FilterNode::Or { children, .. }
            | FilterNode::Not { children, .. } => children,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, FilterNode::Simple { .. })
    }
}
