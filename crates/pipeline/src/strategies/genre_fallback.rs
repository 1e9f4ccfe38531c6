//! Rank by genre similarity when no title matched.

use super::rank_descending;
use crate::traits::{QueryContext, RankingStrategy, ScoredId};
use anyhow::{Context, Result};
use data_loader::ItemId;
use std::collections::HashSet;
use tracing::debug;

/// Anchors on the first filtered item when a genre is selected.
///
/// ## Algorithm
/// 1. Applies only when the genre filter is not "All" and something
///    survived filtering
/// 2. Anchor = first filtered id (catalog order), related to no search term
/// 3. Rank the whole catalog by genre similarity to the anchor
/// 4. Keep ids in the filtered set (the anchor included), top N
#[derive(Debug, Clone, Copy, Default)]
pub struct GenreFallbackStrategy;

impl RankingStrategy for GenreFallbackStrategy {
    fn name(&self) -> &'static str {
        "genre_fallback"
    }

    fn anchor(&self, ctx: &QueryContext<'_>) -> Option<ItemId> {
        if ctx.query.genre.is_all() {
            return None;
        }
        ctx.filtered.first().copied()
    }

    fn rank(&self, anchor: ItemId, ctx: &QueryContext<'_>) -> Result<Vec<ScoredId>> {
        let row = ctx
            .index
            .genre()
            .row(anchor)
            .with_context(|| format!("No genre similarity row for id {}", anchor))?;

        let allowed: HashSet<ItemId> = ctx.filtered.iter().copied().collect();
        let ranked: Vec<ScoredId> = rank_descending(row, ctx.catalog.ids())
            .into_iter()
            .filter(|scored| allowed.contains(&scored.id))
            .take(ctx.query.top_n)
            .collect();

        debug!("Genre fallback on id {} ranked {} titles", anchor, ranked.len());
        Ok(ranked)
    }
}
