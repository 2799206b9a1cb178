//! Builder operator → wire condition mapping
//!
//! Most operators translate to a single wire tag. `equals`, `not_equals`,
//! `contains` and `not_contains` depend on whether the attribute holds arrays:
//! on arrays they become `ContainsAny` membership tests.

use serde_json::Value;

use super::wire::{FilterExpr, OpTag};
use crate::core::types::{is_array_attribute, DiscoveredAttribute, FilterOperator, FilterValue};

impl FilterOperator {
    /// Wire tag used when the attribute is a scalar
    pub fn wire_tag(&self) -> OpTag {
        match self {
            FilterOperator::Equals => OpTag::Eq,
            FilterOperator::NotEquals => OpTag::NotEq,
            FilterOperator::Contains => OpTag::Glob,
            FilterOperator::NotContains => OpTag::NotGlob,
            FilterOperator::ContainsAny => OpTag::ContainsAny,
            FilterOperator::Greater => OpTag::Gt,
            FilterOperator::GreaterOrEqual => OpTag::Gte,
            FilterOperator::Less => OpTag::Lt,
            FilterOperator::LessOrEqual => OpTag::Lte,
            FilterOperator::In => OpTag::In,
            FilterOperator::NotIn => OpTag::NotIn,
            FilterOperator::Matches => OpTag::Glob,
            FilterOperator::NotMatches => OpTag::NotGlob,
            FilterOperator::Imatches => OpTag::IGlob,
            FilterOperator::NotImatches => OpTag::NotIGlob,
            FilterOperator::Regex => OpTag::Regex,
            FilterOperator::AnyLt => OpTag::AnyLt,
            FilterOperator::AnyGt => OpTag::AnyGt,
        }
    }

    /// Whether the wire form depends on the attribute's discovered type
    pub fn is_type_sensitive(&self) -> bool {
        matches!(
            self,
            FilterOperator::Equals
                | FilterOperator::NotEquals
                | FilterOperator::Contains
                | FilterOperator::NotContains
        )
    }
}

/// Translate one leaf comparison into its wire condition
pub fn convert_condition(
    attribute: &str,
    operator: FilterOperator,
    value: &FilterValue,
    attributes: &[DiscoveredAttribute],
) -> FilterExpr {
    let on_array = operator.is_type_sensitive() && is_array_attribute(attributes, attribute);

    match (operator, on_array) {
        (FilterOperator::Equals, true) => {
            FilterExpr::condition(attribute, OpTag::ContainsAny, value.first())
        }
        (FilterOperator::NotEquals, true) => FilterExpr::negate(FilterExpr::condition(
            attribute,
            OpTag::ContainsAny,
            value.first(),
        )),
        (FilterOperator::Contains, true) => {
            FilterExpr::condition(attribute, OpTag::ContainsAny, value.to_value())
        }
        (FilterOperator::NotContains, true) => FilterExpr::negate(FilterExpr::condition(
            attribute,
            OpTag::ContainsAny,
            value.to_value(),
        )),
        (FilterOperator::Contains | FilterOperator::NotContains, false) => {
            FilterExpr::condition(attribute, operator.wire_tag(), substring_pattern(value))
        }
        (FilterOperator::In | FilterOperator::NotIn, _) => FilterExpr::condition(
            attribute,
            operator.wire_tag(),
            Value::Array(value.to_list()),
        ),
        (op, _) => FilterExpr::condition(attribute, op.wire_tag(), value.to_value()),
    }
}

/// Glob pattern matching `text` anywhere in a string
pub fn substring_glob(text: &str) -> String {
    format!("*{}*", text)
}

fn substring_pattern(value: &FilterValue) -> Value {
    Value::String(substring_glob(&scalar_text(&value.first())))
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
