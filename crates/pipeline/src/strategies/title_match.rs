//! Rank by content similarity to a title the user named.

use super::rank_descending;
use crate::traits::{QueryContext, RankingStrategy, ScoredId};
use anyhow::{Context, Result};
use data_loader::ItemId;
use tracing::debug;

/// Anchors on the first filtered item whose title equals the query.
///
/// ## Algorithm
/// 1. Normalize the query title (trim, lowercase); empty never matches
/// 2. Anchor = first filtered id with that lowercase title
/// 3. Rank the other filtered ids by content similarity to the anchor
/// 4. Keep the top N
#[derive(Debug, Clone, Copy, Default)]
pub struct TitleMatchStrategy;

impl RankingStrategy for TitleMatchStrategy {
    fn name(&self) -> &'static str {
        "title_match"
    }

    fn anchor(&self, ctx: &QueryContext<'_>) -> Option<ItemId> {
        let title = ctx.query.normalized_title();
        if title.is_empty() {
            return None;
        }
        ctx.filtered.iter().copied().find(|&id| {
            ctx.catalog
                .get(id)
                .is_some_and(|item| item.title_lower == title)
        })
    }

    fn rank(&self, anchor: ItemId, ctx: &QueryContext<'_>) -> Result<Vec<ScoredId>> {
        let row = ctx
            .index
            .content()
            .row(anchor)
            .with_context(|| format!("No content similarity row for id {}", anchor))?;

        let mut ranked = rank_descending(row, ctx.filtered.iter().copied().filter(|&id| id != anchor));
        ranked.truncate(ctx.query.top_n);

        debug!("Title match on id {} ranked {} titles", anchor, ranked.len());
        Ok(ranked)
    }
}
