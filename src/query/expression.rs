//! Ranking expression tree ↔ wire literal
//!
//! ```text
//! RankingExpr := attributeName | number | [OperatorTag, RankingExpr, ...]
//! ```
//!
//! Conversion to the wire is a structural transform that keeps operand order
//! and never evaluates or simplifies. Arity is checked separately by
//! [`validate`], which the builder calls before accepting a tree.

use serde_json::Value;

use super::wire::number_value;
use crate::core::error::QueryError;
use crate::core::types::{RankingExprNode, RankingOperator};

/// Convert an expression tree to its nested-array literal
pub fn ranking_expr_to_wire(node: &RankingExprNode) -> Value {
    match node {
        RankingExprNode::Attribute { name, .. } => Value::String(name.clone()),
        RankingExprNode::Constant { value, .. } => number_value(*value),
        RankingExprNode::Operator {
            operator, operands, ..
        } => {
            let mut items = Vec::with_capacity(operands.len() + 1);
            items.push(Value::String(operator.tag().to_string()));
            items.extend(operands.iter().map(ranking_expr_to_wire));
            Value::Array(items)
        }
    }
}

/// Parse a nested-array literal back into a tree with fresh node ids
pub fn ranking_expr_from_wire(value: &Value) -> Result<RankingExprNode, QueryError> {
    match value {
        Value::String(name) => Ok(RankingExprNode::attribute(name.clone())),
        Value::Number(n) => n
            .as_f64()
            .map(RankingExprNode::constant)
            .ok_or_else(|| QueryError::UnsupportedLiteral {
                literal: n.to_string(),
            }),
        Value::Array(items) => {
            let (head, rest) = items
                .split_first()
                .ok_or_else(|| QueryError::UnsupportedLiteral {
                    literal: value.to_string(),
                })?;
            let tag = head.as_str().ok_or_else(|| QueryError::UnsupportedLiteral {
                literal: head.to_string(),
            })?;
            let operator = RankingOperator::from_tag(tag).ok_or_else(|| {
                QueryError::UnknownOperatorTag {
                    tag: tag.to_string(),
                }
            })?;
            let operands = rest
                .iter()
                .map(ranking_expr_from_wire)
                .collect::<Result<Vec<_>, _>>()?;
            Ok(RankingExprNode::operator(operator, operands))
        }
        other => Err(QueryError::UnsupportedLiteral {
            literal: other.to_string(),
        }),
    }
}

/// Check every operator node's operand count against its arity
pub fn validate(node: &RankingExprNode) -> Result<(), QueryError> {
    if let RankingExprNode::Operator {
        operator, operands, ..
    } = node
    {
        let arity = operator.arity();
        if !arity.accepts(operands.len()) {
            return Err(QueryError::InvalidArity {
                operator: operator.tag().to_string(),
                expected: arity.describe().to_string(),
                actual: operands.len(),
            });
        }
        for operand in operands {
            validate(operand)?;
        }
    }
    Ok(())
}

/// Rebuild the tree with the node `id` swapped for `replacement`
pub fn replace_expr_node(
    node: &RankingExprNode,
    id: &str,
    replacement: &RankingExprNode,
) -> RankingExprNode {
    if node.id() == id {
        return replacement.clone();
    }
    match node {
        RankingExprNode::Operator {
            id: node_id,
            operator,
            operands,
        } => RankingExprNode::Operator {
            id: node_id.clone(),
            operator: *operator,
            operands: operands
                .iter()
                .map(|operand| replace_expr_node(operand, id, replacement))
                .collect(),
        },
        leaf => leaf.clone(),
    }
}

/// Attribute names referenced anywhere in the expression, in order of appearance
pub fn referenced_attributes(node: &RankingExprNode) -> Vec<String> {
    let mut names = Vec::new();
    collect_attributes(node, &mut names);
    names
}

fn collect_attributes(node: &RankingExprNode, names: &mut Vec<String>) {
    match node {
        RankingExprNode::Attribute { name, .. } => {
            if !names.contains(name) {
                names.push(name.clone());
            }
        }
        RankingExprNode::Constant { .. } => {}
        RankingExprNode::Operator { operands, .. } => {
            for operand in operands {
                collect_attributes(operand, names);
            }
        }
    }
}
