//! Query resolution: filter, pick a strategy, rank, order by recency.

use crate::filter_pipeline::FilterPipeline;
use crate::ordering::sort_by_recency;
use crate::query::{RecommendQuery, Recommendation};
use crate::strategies::{GenreFallbackStrategy, TitleMatchStrategy};
use crate::traits::{QueryContext, RankingStrategy};
use anyhow::{ensure, Result};
use data_loader::Catalog;
use similarity::SimilarityIndex;
use tracing::{debug, instrument};

/// Ordered list of ranking strategies; the first whose guard holds wins.
pub struct QueryResolver {
    strategies: Vec<Box<dyn RankingStrategy>>,
}

impl QueryResolver {
    /// Resolver with no strategies (every query is empty until some are added)
    pub fn empty() -> Self {
        Self {
            strategies: Vec::new(),
        }
    }

    /// Append a strategy at the lowest priority (builder pattern)
    pub fn add_strategy(mut self, strategy: impl RankingStrategy + 'static) -> Self {
        self.strategies.push(Box::new(strategy));
        self
    }

    /// Strategy names in priority order
    pub fn strategy_names(&self) -> Vec<&'static str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }

    /// Answer one query
    ///
    /// Reads the catalog and index only. Returns an empty list when no
    /// strategy applies; that is not an error.
    #[instrument(skip(self, catalog, index, query), fields(title = %query.title, genre = %query.genre, content_type = %query.content_type))]
    pub fn resolve(
        &self,
        catalog: &Catalog,
        index: &SimilarityIndex,
        query: &RecommendQuery,
    ) -> Result<Vec<Recommendation>> {
        ensure!(
            index.len() == catalog.len(),
            "Similarity index covers {} titles but the catalog has {}",
            index.len(),
            catalog.len()
        );

        let filtered = FilterPipeline::for_query(query).apply(catalog.ids().collect(), catalog)?;
        let ctx = QueryContext {
            catalog,
            index,
            query,
            filtered: &filtered,
        };

        for strategy in &self.strategies {
            let Some(anchor) = strategy.anchor(&ctx) else {
                continue;
            };
            debug!("Strategy {} applies with anchor {}", strategy.name(), anchor);

            let mut recommendations: Vec<Recommendation> = strategy
                .rank(anchor, &ctx)?
                .into_iter()
                .filter_map(|scored| {
                    catalog.get(scored.id).map(|item| Recommendation {
                        item: item.clone(),
                        score: scored.score,
                        strategy: strategy.name(),
                    })
                })
                .collect();
            sort_by_recency(&mut recommendations);
            return Ok(recommendations);
        }

        debug!("No strategy applies ({} titles after filtering)", filtered.len());
        Ok(Vec::new())
    }
}

impl Default for QueryResolver {
    /// Title match, then genre fallback
    fn default() -> Self {
        Self::empty()
            .add_strategy(TitleMatchStrategy)
            .add_strategy(GenreFallbackStrategy)
    }
}
