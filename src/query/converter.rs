//! Unified query ↔ wire query conversion
//!
//! Forward conversion is total: every unified query produces a wire query.
//! Reverse conversion is best-effort: it restores the search, ranking and
//! result settings it recognizes and leaves the filter tree empty.

use tracing::debug;

use super::aggregation::{to_wire_aggregation, WireAggregation};
use super::filters::{compose_filters, search_text_filter};
use super::rank_by::{from_rank_by, to_rank_by, DefaultSort};
use super::wire::{FilterExpr, IncludeAttributes, WireQuery};
use crate::config::QuerySettings;
use crate::core::types::{DiscoveredAttribute, FilterNode, ResultOptions, UnifiedQuery};

/// Converter carrying the defaults it fills in
#[derive(Debug, Clone, Default)]
pub struct QueryConverter {
    settings: QuerySettings,
}

impl QueryConverter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(settings: QuerySettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &QuerySettings {
        &self.settings
    }

    fn default_sort(&self) -> DefaultSort {
        DefaultSort {
            attribute: self.settings.default_sort_attribute.clone(),
            direction: self.settings.default_sort_direction,
        }
    }

    /// Convert a unified query for execution
    pub fn to_wire(&self, query: &UnifiedQuery, attributes: &[DiscoveredAttribute]) -> WireQuery {
        let rank_by = to_rank_by(
            query.search.as_ref(),
            query.ranking.as_ref(),
            &self.default_sort(),
        );
        let filters = compose_filters(None, &query.filters, attributes);
        let results = &query.results;

        debug!(
            query_id = %query.id,
            mode = query.search.as_ref().map(|s| s.mode()).unwrap_or("sort"),
            top_level_filters = query.filters.len(),
            "Converted unified query"
        );

        WireQuery {
            rank_by: Some(rank_by),
            top_k: Some(results.top_k),
            filters,
            include_attributes: (!results.include_attributes.is_empty())
                .then(|| IncludeAttributes::Names(results.include_attributes.clone())),
            include_vectors: results.include_vectors.then_some(true),
            include_dist: results.include_dist.then_some(true),
            consistency: query.consistency.clone(),
        }
    }

    /// Aggregation requests for a query, one per configured aggregation
    pub fn aggregations_to_wire(&self, query: &UnifiedQuery) -> Vec<WireAggregation> {
        query.aggregations.iter().map(to_wire_aggregation).collect()
    }

    /// Convert the flat filter builder's state: ANDed active filters plus the
    /// free-text search box, sorted by the default sort
    pub fn to_wire_flat(
        &self,
        active_filters: &[FilterNode],
        search_text: &str,
        attributes: &[DiscoveredAttribute],
    ) -> WireQuery {
        let default_sort = self.default_sort();
        WireQuery {
            rank_by: Some(to_rank_by(None, None, &default_sort)),
            top_k: Some(self.settings.default_top_k),
            filters: self.build_filters(active_filters, search_text, attributes),
            include_attributes: self
                .settings
                .include_all_attributes
                .then_some(IncludeAttributes::All(true)),
            ..Default::default()
        }
    }

    /// Wire `filters` clause for the flat builder, free text first
    pub fn build_filters(
        &self,
        active_filters: &[FilterNode],
        search_text: &str,
        attributes: &[DiscoveredAttribute],
    ) -> Option<FilterExpr> {
        let text = search_text_filter(search_text, &self.settings.search_text_attribute);
        compose_filters(text, active_filters, attributes)
    }

    /// Rebuild a unified query from a wire query
    pub fn from_wire(&self, wire: &WireQuery) -> UnifiedQuery {
        let (search, ranking) = match &wire.rank_by {
            Some(rank_by) => from_rank_by(rank_by),
            None => (None, None),
        };

        if wire.filters.is_some() {
            debug!("Wire filters are not imported into the filter tree");
        }

        let include_attributes = match &wire.include_attributes {
            Some(IncludeAttributes::Names(names)) => names.clone(),
            _ => Vec::new(),
        };

        UnifiedQuery {
            search,
            ranking,
            results: ResultOptions {
                top_k: wire.top_k.unwrap_or(self.settings.default_top_k),
                include_attributes,
                include_vectors: wire.include_vectors.unwrap_or(false),
                include_dist: wire.include_dist.unwrap_or(false),
            },
            consistency: wire.consistency.clone(),
            ..UnifiedQuery::new()
        }
    }
}

/// Convert a unified query with default settings
pub fn to_wire_query(query: &UnifiedQuery, attributes: &[DiscoveredAttribute]) -> WireQuery {
    QueryConverter::new().to_wire(query, attributes)
}

/// Rebuild a unified query from a wire query with default settings
pub fn from_wire_query(wire: &WireQuery) -> UnifiedQuery {
    QueryConverter::new().from_wire(wire)
}

/// Convert the flat builder's state with default settings
pub fn to_wire_query_flat(
    active_filters: &[FilterNode],
    search_text: &str,
    attributes: &[DiscoveredAttribute],
) -> WireQuery {
    QueryConverter::new().to_wire_flat(active_filters, search_text, attributes)
}
