//! Ranking strategies, tried in order by the resolver.
//!
//! 1. [`TitleMatchStrategy`]: the query names a title in the filtered set
//! 2. [`GenreFallbackStrategy`]: no title, but a genre was chosen
//!
//! When neither applies the query has no results.

pub mod genre_fallback;
pub mod title_match;

pub use genre_fallback::GenreFallbackStrategy;
pub use title_match::TitleMatchStrategy;

use crate::traits::ScoredId;
use data_loader::ItemId;

/// Stable sort by score, best first
///
/// Equal scores keep their input order, which is catalog order for
/// every caller.
pub(crate) fn rank_descending(row: &[f32], candidates: impl IntoIterator<Item = ItemId>) -> Vec<ScoredId> {
    let mut scored: Vec<ScoredId> = candidates
        .into_iter()
        .filter_map(|id| row.get(id).map(|&score| ScoredId { id, score }))
        .collect();
    scored.sort_by(|a, b| b.score.total_cmp(&a.score));
    scored
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rank_descending_is_stable() {
        let row = [0.2, 0.9, 0.2, 0.5, 0.9];
        let ids: Vec<ItemId> = rank_descending(&row, 0..5).iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![1, 4, 3, 0, 2]);
    }

    #[test]
    fn test_rank_descending_skips_out_of_range() {
        let row = [0.2, 0.9];
        let ranked = rank_descending(&row, [0, 7, 1]);
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].id, 1);
    }
}
