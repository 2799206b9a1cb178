//! Search/ranking model ↔ wire `rank_by`
//!
//! | State         | rank_by                                         |
//! |---------------|-------------------------------------------------|
//! | BM25, 1 field | `[field, "BM25", query]`                        |
//! | BM25, many    | `[Sum\|Max\|Product, [w, bm25] \| bm25, ...]`    |
//! | Vector        | `[field, "ANN", vector]`                        |
//! | No search     | `[attribute, asc\|desc]`, default `["id","asc"]` |

use tracing::debug;

use super::wire::{Bm25Term, RankBy};
use crate::core::types::{
    Bm25Field, Bm25Search, RankingConfig, SearchConfig, SortDirection, VectorEncoding,
    VectorSearch,
};

/// Fallback ordering used when neither search nor ranking is set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefaultSort {
    pub attribute: String,
    pub direction: SortDirection,
}

impl Default for DefaultSort {
    fn default() -> Self {
        Self {
            attribute: crate::core::config::DEFAULT_SORT_ATTRIBUTE.to_string(),
            direction: SortDirection::Asc,
        }
    }
}

/// Wire ranking for a query. Never absent.
pub fn to_rank_by(
    search: Option<&SearchConfig>,
    ranking: Option<&RankingConfig>,
    default_sort: &DefaultSort,
) -> RankBy {
    match search {
        Some(SearchConfig::Bm25 { bm25 }) if !bm25.fields.is_empty() => bm25_rank_by(bm25),
        Some(SearchConfig::Vector { vector }) => RankBy::Ann {
            attribute: vector.field.clone(),
            vector: vector.query_vector.clone(),
        },
        Some(SearchConfig::Bm25 { .. }) => {
            debug!("BM25 search without fields, falling back to sort");
            sort_rank_by(ranking, default_sort)
        }
        None => sort_rank_by(ranking, default_sort),
    }
}

fn bm25_rank_by(bm25: &Bm25Search) -> RankBy {
    if let [Bm25Field {
        field,
        weight: None,
    }] = bm25.fields.as_slice()
    {
        return RankBy::Bm25 {
            attribute: field.clone(),
            query: bm25.query.clone(),
        };
    }

    RankBy::Combined {
        combiner: bm25.operator,
        terms: bm25
            .fields
            .iter()
            .map(|f| Bm25Term {
                weight: f.weight,
                attribute: f.field.clone(),
                query: bm25.query.clone(),
            })
            .collect(),
    }
}

/// An explicit ranking fills its unset fields with the fixed `id`/`asc`
/// defaults of [`RankingConfig`]; `default_sort` applies only without one.
fn sort_rank_by(ranking: Option<&RankingConfig>, default_sort: &DefaultSort) -> RankBy {
    match ranking {
        Some(ranking) => RankBy::sort(ranking.attribute(), ranking.direction()),
        None => RankBy::sort(default_sort.attribute.clone(), default_sort.direction),
    }
}

/// Recover search and ranking settings from a wire `rank_by`.
/// Unrecognized shapes leave both unset.
///
/// A sort comes back with both fields set, so a ranking whose attribute or
/// direction was left unset returns with the defaults filled in.
pub fn from_rank_by(rank_by: &RankBy) -> (Option<SearchConfig>, Option<RankingConfig>) {
    match rank_by {
        RankBy::Sort {
            attribute,
            direction,
        } => (None, Some(RankingConfig::simple(attribute.clone(), *direction))),
        RankBy::Bm25 { attribute, query } => (
            Some(SearchConfig::Bm25 {
                bm25: Bm25Search {
                    fields: vec![Bm25Field::new(attribute.clone())],
                    query: query.clone(),
                    operator: Default::default(),
                },
            }),
            None,
        ),
        RankBy::Ann { attribute, vector } => (
            Some(SearchConfig::Vector {
                vector: VectorSearch {
                    field: attribute.clone(),
                    query_vector: vector.clone(),
                    encoding: VectorEncoding::default(),
                },
            }),
            None,
        ),
        RankBy::Combined { combiner, terms } => {
            // The builder applies one query string to every field
            let Some(query) = terms.first().map(|t| t.query.clone()) else {
                return (None, None);
            };
            if terms.iter().any(|t| t.query != query) {
                debug!("Combined BM25 ranking uses differing queries, not importing");
                return (None, None);
            }
            let fields = terms
                .iter()
                .map(|t| Bm25Field {
                    field: t.attribute.clone(),
                    weight: t.weight,
                })
                .collect();
            (
                Some(SearchConfig::Bm25 {
                    bm25: Bm25Search {
                        fields,
                        query,
                        operator: *combiner,
                    },
                }),
                None,
            )
        }
        RankBy::Raw(value) => {
            debug!(rank_by = %value, "Unrecognized rank_by shape, not importing");
            (None, None)
        }
    }
}
