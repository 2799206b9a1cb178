//! Query conversion module
//!
//! This module provides:
//! - The wire query model and its nested-array JSON codec
//! - Attribute-type-aware operator rewriting
//! - Search/ranking ↔ `rank_by` translation
//! - Unified query ↔ wire query conversion
//! - Ranking expression and aggregation wire forms

pub mod aggregation;
pub mod converter;
pub mod expression;
pub mod filters;
pub mod operators;
pub mod rank_by;
pub mod wire;


pub use aggregation::{to_wire_aggregation, WireAggregation};
pub use converter::{from_wire_query, to_wire_query, to_wire_query_flat, QueryConverter};
pub use expression::{
    ranking_expr_from_wire, ranking_expr_to_wire, referenced_attributes, replace_expr_node,
    validate,
};
pub use filters::{compose_filters, convert_node, normalize, search_text_filter};
pub use operators::{convert_condition, substring_glob};
pub use rank_by::{from_rank_by, to_rank_by, DefaultSort};
pub use wire::{Bm25Term, FilterExpr, IncludeAttributes, OpTag, RankBy, WireQuery};
