//! # Recommender
//!
//! Startup and query entry point:
//! 1. Load the catalog (once)
//! 2. Build the similarity index (once)
//! 3. Answer any number of read-only queries against both
//!
//! The catalog and index sit behind `Arc`, so cloning a Recommender is
//! cheap and clones can serve queries from many threads at once.

use std::sync::Arc;
use std::time::Instant;

use anyhow::{anyhow, Context, Result};
use serde::Serialize;
use tracing::info;

use data_loader::Catalog;
use pipeline::{QueryResolver, RecommendQuery, Recommendation};
use similarity::{SimilarityIndex, SimilarityKind};

use crate::config::RecommenderConfig;

/// Content and genre similarity between two titles
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PairSimilarity {
    pub content: f32,
    pub genre: f32,
}

/// Immutable catalog + index with the default query resolver
#[derive(Clone)]
pub struct Recommender {
    catalog: Arc<Catalog>,
    index: Arc<SimilarityIndex>,
    resolver: Arc<QueryResolver>,
    default_top_n: usize,
}

impl Recommender {
    /// Load the catalog and build the index described by `config`
    ///
    /// Any failure here is fatal: there is nothing to serve without a catalog.
    pub fn load(config: &RecommenderConfig) -> Result<Self> {
        let start = Instant::now();

        let catalog = Catalog::load_from_file(&config.catalog_path, &config.load)
            .with_context(|| format!("Failed to load catalog {}", config.catalog_path.display()))?;
        let index = SimilarityIndex::build(&catalog);

        info!(
            "Recommender ready: {} titles in {:.2?}",
            catalog.len(),
            start.elapsed()
        );

        let recommender = Self::new(Arc::new(catalog), Arc::new(index))?;
        Ok(recommender.with_default_top_n(config.default_top_n))
    }

    /// Wrap an already-built catalog and index
    ///
    /// The index must have been built from this catalog.
    pub fn new(catalog: Arc<Catalog>, index: Arc<SimilarityIndex>) -> Result<Self> {
        if catalog.len() != index.len() {
            return Err(anyhow!(
                "Similarity index covers {} titles but the catalog has {}",
                index.len(),
                catalog.len()
            ));
        }
        Ok(Self {
            catalog,
            index,
            resolver: Arc::new(QueryResolver::default()),
            default_top_n: pipeline::DEFAULT_TOP_N,
        })
    }

    pub fn with_default_top_n(mut self, top_n: usize) -> Self {
        self.default_top_n = top_n;
        self
    }

    pub fn default_top_n(&self) -> usize {
        self.default_top_n
    }

    /// Recommend from the raw selector strings of a UI
    ///
    /// # Arguments
    /// * `title` - Free text; matched exactly after trim + lowercase
    /// * `genre` - A genre or "All"
    /// * `content_type` - "Both", "Movie" or "TV Show"
    /// * `top_n` - Maximum results (`None` uses the configured default)
    ///
    /// # Returns
    /// Up to `top_n` recommendations, most recent first. No match gives an
    /// empty list, not an error.
    pub fn recommend(
        &self,
        title: &str,
        genre: &str,
        content_type: &str,
        top_n: Option<usize>,
    ) -> Result<Vec<Recommendation>> {
        let query = RecommendQuery::parse(
            title,
            genre,
            content_type,
            top_n.unwrap_or(self.default_top_n),
        )?;
        self.recommend_query(&query)
    }

    /// Recommend for an already-built query
    pub fn recommend_query(&self, query: &RecommendQuery) -> Result<Vec<Recommendation>> {
        self.resolver
            .resolve(&self.catalog, &self.index, query)
            .context("Failed to resolve query")
    }

    /// Similarity scores between two titles (exact, case-insensitive)
    pub fn similarity_between(&self, first: &str, second: &str) -> Result<PairSimilarity> {
        let a = self
            .catalog
            .find_by_title(first)
            .ok_or_else(|| anyhow!("Title '{}' not found", first))?;
        let b = self
            .catalog
            .find_by_title(second)
            .ok_or_else(|| anyhow!("Title '{}' not found", second))?;

        let score = |kind| {
            self.index
                .score(kind, a.id, b.id)
                .ok_or_else(|| anyhow!("No {} score for ids {} and {}", kind, a.id, b.id))
        };
        Ok(PairSimilarity {
            content: score(SimilarityKind::Content)?,
            genre: score(SimilarityKind::Genre)?,
        })
    }

    /// "All" followed by the catalog's main genres
    pub fn genre_options(&self) -> Vec<String> {
        self.catalog.genre_options()
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn index(&self) -> &SimilarityIndex {
        &self.index
    }
}
