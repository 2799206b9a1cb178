//! Filter tree → wire filter expression
//!
//! Translation is direct: no de-duplication, no algebraic simplification.
//! Normalization happens only at the top level, where the free-text filter and
//! the builder's filters are combined.

use tracing::trace;

use super::operators::{convert_condition, substring_glob};
use super::wire::{FilterExpr, OpTag};
use crate::core::types::{DiscoveredAttribute, FilterNode};

/// Convert one filter node. Composite nodes with nothing to convert yield `None`.
pub fn convert_node(node: &FilterNode, attributes: &[DiscoveredAttribute]) -> Option<FilterExpr> {
    match node {
        FilterNode::Simple {
            attribute,
            operator,
            value,
            ..
        } => Some(convert_condition(attribute, *operator, value, attributes)),
        FilterNode::And { children, .. } => {
            let converted = convert_children(children, attributes);
            (!converted.is_empty()).then_some(FilterExpr::And(converted))
        }
        FilterNode::Or { children, .. } => {
            let converted = convert_children(children, attributes);
            (!converted.is_empty()).then_some(FilterExpr::Or(converted))
        }
        FilterNode::Not { children, .. } => {
            let mut converted = convert_children(children, attributes);
            let inner = match converted.len() {
                0 => return None,
                1 => converted.remove(0),
                // More than one child under NOT negates their conjunction
                _ => FilterExpr::And(converted),
            };
            Some(FilterExpr::negate(inner))
        }
    }
}

fn convert_children(
    children: &[FilterNode],
    attributes: &[DiscoveredAttribute],
) -> Vec<FilterExpr> {
    children
        .iter()
        .filter_map(|child| convert_node(child, attributes))
        .collect()
}

/// Free-text search box filter: substring match against `attribute`.
/// Blank text contributes nothing.
pub fn search_text_filter(text: &str, attribute: &str) -> Option<FilterExpr> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(FilterExpr::condition(
        attribute,
        OpTag::Glob,
        serde_json::Value::String(substring_glob(trimmed)),
    ))
}

/// Combine top-level clauses: none → absent, one → itself, more → `And`
pub fn normalize(mut clauses: Vec<FilterExpr>) -> Option<FilterExpr> {
    match clauses.len() {
        0 => None,
        1 => clauses.pop(),
        _ => Some(FilterExpr::And(clauses)),
    }
}

/// Build the wire `filters` clause from an optional free-text filter and the
/// builder's top-level nodes, free text first
pub fn compose_filters(
    search_text: Option<FilterExpr>,
    nodes: &[FilterNode],
    attributes: &[DiscoveredAttribute],
) -> Option<FilterExpr> {
    let mut clauses = Vec::with_capacity(nodes.len() + 1);
    clauses.extend(search_text);
    clauses.extend(nodes.iter().filter_map(|node| convert_node(node, attributes)));

    trace!(clauses = clauses.len(), "Composed filter clauses");
    normalize(clauses)
}
