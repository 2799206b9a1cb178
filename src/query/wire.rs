//! Wire-format query model
//!
//! The vector database accepts queries as JSON objects whose filter and
//! ranking clauses are nested arrays rather than objects:
//!
//! ```text
//! FilterExpr := [attribute, OpTag, value]
//!             | ["And", [FilterExpr, ...]] | ["Or", [FilterExpr, ...]]
//!             | ["Not", FilterExpr]
//! RankBy     := [attribute, "asc"|"desc"]
//!             | [attribute, "BM25", query] | [attribute, "ANN", vector]
//!             | ["Sum"|"Max"|"Product", [weight, bm25] | bm25, ...]
//! ```
//!
//! The types here serialize to exactly that grammar. Parsing is lenient:
//! shapes that are not recognized are kept as [`FilterExpr::Raw`] or
//! [`RankBy::Raw`] instead of failing.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::core::error::QueryError;
use crate::core::types::{Bm25Combiner, Consistency, SortDirection};

#[cfg(test)]
use proptest_derive::Arbitrary;

/// Operator tag of a wire filter condition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(test, derive(Arbitrary))]
pub enum OpTag {
    Eq,
    NotEq,
    Gt,
    Gte,
    Lt,
    Lte,
    In,
    NotIn,
    Glob,
    NotGlob,
    IGlob,
    NotIGlob,
    Regex,
    ContainsAny,
    AnyLt,
    AnyGt,
}

impl OpTag {
    pub const ALL: [OpTag; 16] = [
        OpTag::Eq,
        OpTag::NotEq,
        OpTag::Gt,
        OpTag::Gte,
        OpTag::Lt,
        OpTag::Lte,
        OpTag::In,
        OpTag::NotIn,
        OpTag::Glob,
        OpTag::NotGlob,
        OpTag::IGlob,
        OpTag::NotIGlob,
        OpTag::Regex,
        OpTag::ContainsAny,
        OpTag::AnyLt,
        OpTag::AnyGt,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OpTag::Eq => "Eq",
            OpTag::NotEq => "NotEq",
            OpTag::Gt => "Gt",
            OpTag::Gte => "Gte",
            OpTag::Lt => "Lt",
            OpTag::Lte => "Lte",
            OpTag::In => "In",
            OpTag::NotIn => "NotIn",
            OpTag::Glob => "Glob",
            OpTag::NotGlob => "NotGlob",
            OpTag::IGlob => "IGlob",
            OpTag::NotIGlob => "NotIGlob",
            OpTag::Regex => "Regex",
            OpTag::ContainsAny => "ContainsAny",
            OpTag::AnyLt => "AnyLt",
            OpTag::AnyGt => "AnyGt",
        }
    }

    pub fn parse(tag: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|t| t.as_str() == tag)
    }
}

impl std::fmt::Display for OpTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Wire filter expression
#[derive(Debug, Clone, PartialEq)]
pub enum FilterExpr {
    Condition {
        attribute: String,
        op: OpTag,
        value: Value,
    },
    And(Vec<FilterExpr>),
    Or(Vec<FilterExpr>),
    Not(Box<FilterExpr>),
    /// Unrecognized shape, passed through untouched
    Raw(Value),
}

impl FilterExpr {
    pub fn condition(attribute: impl Into<String>, op: OpTag, value: Value) -> Self {
        FilterExpr::Condition {
            attribute: attribute.into(),
            op,
            value,
        }
    }

    pub fn negate(inner: FilterExpr) -> Self {
        FilterExpr::Not(Box::new(inner))
    }

    pub fn to_value(&self) -> Value {
        match self {
            FilterExpr::Condition {
                attribute,
                op,
                value,
            } => Value::Array(vec![
                Value::String(attribute.clone()),
                Value::String(op.as_str().to_string()),
                value.clone(),
            ]),
            FilterExpr::And(children) => group_value("And", children),
            FilterExpr::Or(children) => group_value("Or", children),
            FilterExpr::Not(inner) => {
                Value::Array(vec![Value::String("Not".to_string()), inner.to_value()])
            }
            FilterExpr::Raw(value) => value.clone(),
        }
    }

    /// Parse the nested-array grammar. Anything unrecognized becomes `Raw`.
    pub fn from_value(value: &Value) -> Self {
        let Some(items) = value.as_array() else {
            return FilterExpr::Raw(value.clone());
        };

        match items.as_slice() {
            [Value::String(head), Value::Array(children)] if head == "And" || head == "Or" => {
                let children = children.iter().map(FilterExpr::from_value).collect();
                if head == "And" {
                    FilterExpr::And(children)
                } else {
                    FilterExpr::Or(children)
                }
            }
            [Value::String(head), inner @ Value::Array(_)] if head == "Not" => {
                FilterExpr::negate(FilterExpr::from_value(inner))
            }
            [Value::String(attribute), Value::String(tag), operand] => match OpTag::parse(tag) {
                Some(op) => FilterExpr::condition(attribute.clone(), op, operand.clone()),
                None => FilterExpr::Raw(value.clone()),
            },
            _ => FilterExpr::Raw(value.clone()),
        }
    }

    /// Number of leaf conditions, counting raw fragments as one
    pub fn condition_count(&self) -> usize {
        match self {
            FilterExpr::Condition { .. } | FilterExpr::Raw(_) => 1,
            FilterExpr::And(children) | FilterExpr::Or(children) => {
                children.iter().map(FilterExpr::condition_count).sum()
            }
            FilterExpr::Not(inner) => inner.condition_count(),
        }
    }
}

fn group_value(tag: &str, children: &[FilterExpr]) -> Value {
    Value::Array(vec![
        Value::String(tag.to_string()),
        Value::Array(children.iter().map(FilterExpr::to_value).collect()),
    ])
}

impl Serialize for FilterExpr {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_value().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for FilterExpr {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(FilterExpr::from_value(&value))
    }
}

impl Bm25Combiner {
    /// Wire tag combining multi-field BM25 scores
    pub fn wire_tag(&self) -> &'static str {
        match self {
            Bm25Combiner::Sum => "Sum",
            Bm25Combiner::Max => "Max",
            Bm25Combiner::Product => "Product",
        }
    }

    pub fn from_wire_tag(tag: &str) -> Option<Self> {
        match tag {
            "Sum" => Some(Bm25Combiner::Sum),
            "Max" => Some(Bm25Combiner::Max),
            "Product" => Some(Bm25Combiner::Product),
            _ => None,
        }
    }
}

/// One BM25 clause inside a combined ranking
#[derive(Debug, Clone, PartialEq)]
pub struct Bm25Term {
    pub weight: Option<f64>,
    pub attribute: String,
    pub query: String,
}

impl Bm25Term {
    fn to_value(&self) -> Value {
        let clause = bm25_value(&self.attribute, &self.query);
        match self.weight {
            Some(weight) => Value::Array(vec![Value::from(weight), clause]),
            None => clause,
        }
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value.as_array()?.as_slice() {
            [weight @ Value::Number(_), clause] => {
                let (attribute, query) = parse_bm25(clause)?;
                Some(Self {
                    weight: weight.as_f64(),
                    attribute,
                    query,
                })
            }
            _ => {
                let (attribute, query) = parse_bm25(value)?;
                Some(Self {
                    weight: None,
                    attribute,
                    query,
                })
            }
        }
    }
}

/// Wire ranking clause
#[derive(Debug, Clone, PartialEq)]
pub enum RankBy {
    Sort {
        attribute: String,
        direction: SortDirection,
    },
    Bm25 {
        attribute: String,
        query: String,
    },
    Ann {
        attribute: String,
        vector: Vec<f64>,
    },
    Combined {
        combiner: Bm25Combiner,
        terms: Vec<Bm25Term>,
    },
    Raw(Value),
}

impl RankBy {
    pub fn sort(attribute: impl Into<String>, direction: SortDirection) -> Self {
        RankBy::Sort {
            attribute: attribute.into(),
            direction,
        }
    }

    pub fn to_value(&self) -> Value {
        match self {
            RankBy::Sort {
                attribute,
                direction,
            } => Value::Array(vec![
                Value::String(attribute.clone()),
                Value::String(direction.as_str().to_string()),
            ]),
            RankBy::Bm25 { attribute, query } => bm25_value(attribute, query),
            RankBy::Ann { attribute, vector } => Value::Array(vec![
                Value::String(attribute.clone()),
                Value::String("ANN".to_string()),
                Value::Array(vector.iter().map(|x| Value::from(*x)).collect()),
            ]),
            RankBy::Combined { combiner, terms } => {
                let mut items = Vec::with_capacity(terms.len() + 1);
                items.push(Value::String(combiner.wire_tag().to_string()));
                items.extend(terms.iter().map(Bm25Term::to_value));
                Value::Array(items)
            }
            RankBy::Raw(value) => value.clone(),
        }
    }

    /// Recognize the ranking shapes the builder can produce
    pub fn from_value(value: &Value) -> Self {
        let Some(items) = value.as_array() else {
            return RankBy::Raw(value.clone());
        };

        match items.as_slice() {
            [Value::String(attribute), Value::String(dir)] => {
                if let Some(direction) = SortDirection::parse(dir) {
                    return RankBy::sort(attribute.clone(), direction);
                }
            }
            [Value::String(attribute), Value::String(kind), Value::String(query)]
                if kind == "BM25" =>
            {
                return RankBy::Bm25 {
                    attribute: attribute.clone(),
                    query: query.clone(),
                };
            }
            [Value::String(attribute), Value::String(kind), Value::Array(vector)]
                if kind == "ANN" =>
            {
                let parsed: Option<Vec<f64>> = vector.iter().map(Value::as_f64).collect();
                if let Some(vector) = parsed {
                    return RankBy::Ann {
                        attribute: attribute.clone(),
                        vector,
                    };
                }
            }
            _ => {}
        }

        if let [Value::String(tag), rest @ ..] = items.as_slice() {
            if let Some(combiner) = Bm25Combiner::from_wire_tag(tag) {
                let terms: Option<Vec<Bm25Term>> = rest.iter().map(Bm25Term::from_value).collect();
                if let Some(terms) = terms.filter(|t| !t.is_empty()) {
                    return RankBy::Combined { combiner, terms };
                }
            }
        }

        RankBy::Raw(value.clone())
    }
}

fn bm25_value(attribute: &str, query: &str) -> Value {
    Value::Array(vec![
        Value::String(attribute.to_string()),
        Value::String("BM25".to_string()),
        Value::String(query.to_string()),
    ])
}

fn parse_bm25(value: &Value) -> Option<(String, String)> {
    match value.as_array()?.as_slice() {
        [Value::String(attribute), Value::String(kind), Value::String(query)] if kind == "BM25" => {
            Some((attribute.clone(), query.clone()))
        }
        _ => None,
    }
}

impl Serialize for RankBy {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_value().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for RankBy {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(RankBy::from_value(&value))
    }
}

/// Integral numbers are written without a fractional part
pub fn number_value(n: f64) -> Value {
    const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;
    if n.is_finite() && n.fract() == 0.0 && n.abs() <= MAX_SAFE_INTEGER {
        Value::from(n as i64)
    } else {
        Value::from(n)
    }
}

/// Attribute selection: everything, or a named list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IncludeAttributes {
    All(bool),
    Names(Vec<String>),
}

/// Query object sent to the vector database.
///
/// Fields other than `rank_by` and `filters` are read leniently: a value of the
/// wrong shape is dropped instead of rejecting the whole query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct WireQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rank_by: Option<RankBy>,

    #[serde(
        default,
        deserialize_with = "lenient_top_k",
        skip_serializing_if = "Option::is_none"
    )]
    pub top_k: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filters: Option<FilterExpr>,

    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub include_attributes: Option<IncludeAttributes>,

    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub include_vectors: Option<bool>,

    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub include_dist: Option<bool>,

    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub consistency: Option<Consistency>,
}

/// Read any JSON value, keeping it only if it has the expected shape
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// Non-negative integer `top_k`, also written as an integral float (`100.0`)
fn lenient_top_k<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let top_k = match value.as_u64() {
        Some(n) => u32::try_from(n).ok(),
        None => value
            .as_f64()
            .filter(|n| n.fract() == 0.0 && *n >= 0.0 && *n <= f64::from(u32::MAX))
            .map(|n| n as u32),
    };
    Ok(top_k)
}

impl WireQuery {
    pub fn from_json(json: &str) -> Result<Self, QueryError> {
        serde_json::from_str(json).map_err(|e| QueryError::InvalidWireJson {
            reason: e.to_string(),
        })
    }

    pub fn to_json(&self) -> Value {
        // Every field serializes through serde_json::Value already
        serde_json::to_value(self).unwrap_or(Value::Null)
    }

    pub fn to_json_string(&self) -> String {
        self.to_json().to_string()
    }
}
