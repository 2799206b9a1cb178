//! Ranking expression types
//!
//! Arithmetic expressions over document attributes and numeric constants used
//! by the expression-ranking feature.

use serde::{Deserialize, Serialize};

use super::filter::new_node_id;

#[cfg(test)]
use proptest_derive::Arbitrary;

/// Arithmetic operator of a ranking expression
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[cfg_attr(test, derive(Arbitrary))]
pub enum RankingOperator {
    Add,
    Sub,
    Mul,
    Div,
    Log,
    Exp,
    Abs,
    Min,
    Max,
    Pow,
    Sqrt,
}

/// Number of operands an operator accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    Unary,
    Binary,
    /// Two or more operands
    Variadic,
}

impl Arity {
    pub fn accepts(&self, count: usize) -> bool {
        match self {
            Arity::Unary => count == 1,
            Arity::Binary => count == 2,
            Arity::Variadic => count >= 2,
        }
    }

    pub fn describe(&self) -> &'static str {
        match self {
            Arity::Unary => "1",
            Arity::Binary => "2",
            Arity::Variadic => "at least 2",
        }
    }
}

impl RankingOperator {
    pub const ALL: [RankingOperator; 11] = [
        RankingOperator::Add,
        RankingOperator::Sub,
        RankingOperator::Mul,
        RankingOperator::Div,
        RankingOperator::Log,
        RankingOperator::Exp,
        RankingOperator::Abs,
        RankingOperator::Min,
        RankingOperator::Max,
        RankingOperator::Pow,
        RankingOperator::Sqrt,
    ];

    /// Wire tag of the operator
    pub fn tag(&self) -> &'static str {
        match self {
            RankingOperator::Add => "Add",
            RankingOperator::Sub => "Sub",
            RankingOperator::Mul => "Mul",
            RankingOperator::Div => "Div",
            RankingOperator::Log => "Log",
            RankingOperator::Exp => "Exp",
            RankingOperator::Abs => "Abs",
            RankingOperator::Min => "Min",
            RankingOperator::Max => "Max",
            RankingOperator::Pow => "Pow",
            RankingOperator::Sqrt => "Sqrt",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|op| op.tag() == tag)
    }

    pub fn arity(&self) -> Arity {
        match self {
            RankingOperator::Log
            | RankingOperator::Exp
            | RankingOperator::Abs
            | RankingOperator::Sqrt => Arity::Unary,
            RankingOperator::Sub | RankingOperator::Div | RankingOperator::Pow => Arity::Binary,
            RankingOperator::Add
            | RankingOperator::Mul
            | RankingOperator::Min
            | RankingOperator::Max => Arity::Variadic,
        }
    }
}

/// Node of a ranking expression tree
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum RankingExprNode {
    Operator {
        id: String,
        operator: RankingOperator,
        operands: Vec<RankingExprNode>,
    },
    /// Reference to a numeric document attribute
    Attribute { id: String, name: String },
    Constant { id: String, value: f64 },
}

impl RankingExprNode {
    pub fn operator(operator: RankingOperator, operands: Vec<RankingExprNode>) -> Self {
        RankingExprNode::Operator {
            id: new_node_id(),
            operator,
            operands,
        }
    }

    pub fn attribute(name: impl Into<String>) -> Self {
        RankingExprNode::Attribute {
            id: new_node_id(),
            name: name.into(),
        }
    }

    pub fn constant(value: f64) -> Self {
        RankingExprNode::Constant {
            id: new_node_id(),
            value,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            RankingExprNode::Operator { id, .. }
            | RankingExprNode::Attribute { id, .. }
            | RankingExprNode::Constant { id, .. } => id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Every operator's tag maps back to it
        #[test]
        fn prop_tag_roundtrip(op in any::<RankingOperator>()) {
            prop_assert_eq!(RankingOperator::from_tag(op.tag()), Some(op));
        }
    }

    #[test]
    fn test_arity() {
        assert!(RankingOperator::Log.arity().accepts(1));
        assert!(!RankingOperator::Log.arity().accepts(2));
        assert!(RankingOperator::Sub.arity().accepts(2));
        assert!(!RankingOperator::Sub.arity().accepts(3));
        assert!(RankingOperator::Add.arity().accepts(5));
        assert!(!RankingOperator::Add.arity().accepts(1));
        assert_eq!(RankingOperator::Max.arity().describe(), "at least 2");
    }

    #[test]
    fn test_expression_json_shape() {
        let node = RankingExprNode::Constant {
            id: "c".to_string(),
            value: 1.5,
        };
        assert_eq!(
            serde_json::to_value(&node).unwrap(),
            serde_json::json!({"type": "constant", "id": "c", "value": 1.5})
        );
    }
}
