//! Core traits for the query pipeline.
//!
//! - [`Filter`] narrows the candidate ids before ranking
//! - [`RankingStrategy`] picks an anchor and ranks candidates against it

use crate::query::RecommendQuery;
use anyhow::Result;
use data_loader::{Catalog, ItemId};
use similarity::SimilarityIndex;

/// Core trait for filtering candidates.
///
/// ## Design Note
/// - `Send + Sync` allows filters to be shared across query threads
/// - Filters take ownership of the id list and return the survivors in
///   their original order
pub trait Filter: Send + Sync {
    /// Returns the name of this filter (for logging/debugging)
    fn name(&self) -> &str;

    /// Apply this filter to a set of candidate ids.
    ///
    /// Ids that are not in the catalog are dropped.
    fn apply(&self, candidates: Vec<ItemId>, catalog: &Catalog) -> Result<Vec<ItemId>>;
}

/// Everything a strategy may read while answering one query.
#[derive(Clone, Copy)]
pub struct QueryContext<'a> {
    pub catalog: &'a Catalog,
    pub index: &'a SimilarityIndex,
    pub query: &'a RecommendQuery,
    /// Ids surviving the filter stage, in catalog order
    pub filtered: &'a [ItemId],
}

/// A candidate id with the similarity score it was ranked by
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredId {
    pub id: ItemId,
    pub score: f32,
}

/// One rule in the ordered strategy list.
///
/// `anchor` is the guard: a strategy applies to a query exactly when it
/// can find an anchor. The resolver tries strategies in order and the
/// first one that applies produces the ranking.
pub trait RankingStrategy: Send + Sync {
    fn name(&self) -> &'static str;

    /// The id whose similarity row drives the ranking, if this strategy applies
    fn anchor(&self, ctx: &QueryContext<'_>) -> Option<ItemId>;

    /// Rank candidates against `anchor`, best first, at most `top_n` entries
    fn rank(&self, anchor: ItemId, ctx: &QueryContext<'_>) -> Result<Vec<ScoredId>>;
}
