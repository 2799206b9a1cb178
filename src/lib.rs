//! VecDB Explorer - query core of the vector database explorer
//!
//! This crate provides the conversion layer between the explorer's query
//! builder and the vector database's wire format:
//! - Unified query model (filter trees, search modes, ranking, aggregations)
//! - Attribute-type-aware conversion to and from wire queries
//! - Ranking expression and aggregation wire forms
//! - Pure filter tree editing for immutable UI state
//! - Attribute type discovery from sampled documents

pub mod attributes;
pub mod config;
pub mod core;
pub mod filter;
pub mod logging;
pub mod query;

// Re-export commonly used items
pub use crate::config::QuerySettings;
pub use crate::core::error::{ExplorerError, QueryError, Result};
pub use crate::core::types::{
    DiscoveredAttribute, FilterNode, FilterOperator, FilterValue, RankingConfig, RankingExprNode,
    SearchConfig, UnifiedQuery,
};
pub use crate::query::{
    from_wire_query, ranking_expr_to_wire, to_wire_query, to_wire_query_flat, FilterExpr,
    QueryConverter, RankBy, WireQuery,
};
