//! Final display order of a result set.

use crate::query::Recommendation;

/// Sort by release year, most recent first
///
/// The sort is stable, so titles from the same year keep their ranking
/// order. Unknown years go last.
pub fn sort_by_recency(recommendations: &mut [Recommendation]) {
    recommendations.sort_by(|a, b| b.item.release_year.cmp(&a.item.release_year));
}
