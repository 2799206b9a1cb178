//! Canonical query defaults
//!
//! Every call site that needs a default `top_k`, sort attribute or model
//! version reads it from here.

/// Default number of results requested when a query does not specify one
pub const DEFAULT_TOP_K: u32 = 100;

/// Attribute used for the default sort and as the free-text search target
pub const DEFAULT_SORT_ATTRIBUTE: &str = "id";

/// Attribute matched by the free-text search box
pub const SEARCH_TEXT_ATTRIBUTE: &str = "id";

/// Version stamped on newly created unified queries
pub const QUERY_MODEL_VERSION: u32 = 1;

/// Attribute counted by `Count` aggregations
pub const COUNT_ATTRIBUTE: &str = "id";
