//! The FilterPipeline orchestrates multiple filters.
//!
//! This module provides the main FilterPipeline struct that chains
//! multiple filters together using the builder pattern.

use crate::query::RecommendQuery;
use crate::traits::Filter;
use anyhow::Result;
use data_loader::{Catalog, ItemId};
use tracing;

/// Chains multiple filters together into a processing pipeline.
///
/// ## Usage
/// ```ignore
/// let pipeline = FilterPipeline::new()
///     .add_filter(ContentTypeFilter::Movie)
///     .add_filter(GenreFilter::Genre("Comedies".into()));
///
/// let filtered = pipeline.apply(catalog.ids().collect(), &catalog)?;
/// ```
pub struct FilterPipeline {
    filters: Vec<Box<dyn Filter>>,
}

impl FilterPipeline {
    /// Create a new empty FilterPipeline.
    pub fn new() -> Self {
        Self {
            filters: Vec::new(),
        }
    }

    /// The filter stage of a query: content type first, then genre
    pub fn for_query(query: &RecommendQuery) -> Self {
        Self::new()
            .add_filter(query.content_type)
            .add_filter(query.genre.clone())
    }

    /// Add a filter to the pipeline (builder pattern).
    pub fn add_filter(mut self, filter: impl Filter + 'static) -> Self {
        self.filters.push(Box::new(filter));
        self
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Apply all filters in sequence to the candidates.
    ///
    /// Order is preserved: the output is a subsequence of the input.
    pub fn apply(&self, candidates: Vec<ItemId>, catalog: &Catalog) -> Result<Vec<ItemId>> {
        let mut current = candidates;
        for filter in &self.filters {
            tracing::debug!(
                "Applying filter: {} (input count: {})",
                filter.name(),
                current.len()
            );
            current = filter.apply(current, catalog)?;
            tracing::debug!(
                "Filter applied: {} (output count: {})",
                filter.name(),
                current.len()
            );
        }
        Ok(current)
    }
}

impl Default for FilterPipeline {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::{ContentTypeFilter, GenreFilter};
    use data_loader::{LoadOptions, RawRecord};

    fn create_test_catalog() -> Catalog {
        let record = |genres: &str, kind: &str| RawRecord {
            genres: Some(genres.to_string()),
            kind: Some(kind.to_string()),
            ..RawRecord::default()
        };
        Catalog::from_records(
            vec![
                record("Comedies", "Movie"),
                record("Comedies", "TV Show"),
                record("Dramas", "Movie"),
                record("Dramas, Comedies", "Movie"),
            ],
            &LoadOptions::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_empty_pipeline() {
        let catalog = create_test_catalog();
        let pipeline = FilterPipeline::new();
        let filtered = pipeline.apply(catalog.ids().collect(), &catalog).unwrap();
        assert_eq!(filtered, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_chained_filters() {
        let catalog = create_test_catalog();
        let pipeline = FilterPipeline::new()
            .add_filter(ContentTypeFilter::Movie)
            .add_filter(GenreFilter::Genre("comedies".to_string()));

        let filtered = pipeline.apply(catalog.ids().collect(), &catalog).unwrap();
        assert_eq!(filtered, vec![0, 3]);
    }

    #[test]
    fn test_for_query() {
        let catalog = create_test_catalog();
        let query = RecommendQuery::new("")
            .with_content_type(ContentTypeFilter::TvShow)
            .with_genre(GenreFilter::Genre("Comedies".to_string()));

        let pipeline = FilterPipeline::for_query(&query);
        assert_eq!(pipeline.len(), 2);
        assert_eq!(pipeline.apply(catalog.ids().collect(), &catalog).unwrap(), vec![1]);
    }
}
