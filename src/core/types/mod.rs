//! Core data types for the explorer query core
//!
//! This module defines the unified query model edited by the query builder.

pub mod aggregation;
pub mod attribute;
pub mod filter;
pub mod query;
pub mod ranking;
pub mod search;

// Re-export commonly used types
pub use aggregation::{AggregationConfig, AggregationKind};
pub use attribute::{is_array_attribute, is_array_type, DiscoveredAttribute};
pub use filter::{new_node_id, FilterNode, FilterOperator, FilterValue};
pub use query::{Consistency, ResultOptions, UnifiedQuery};
pub use ranking::{Arity, RankingExprNode, RankingOperator};
pub use search::{
    Bm25Combiner, Bm25Field, Bm25Search, RankingConfig, SearchConfig, SortDirection,
    VectorEncoding, VectorSearch,
};
