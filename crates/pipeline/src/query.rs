//! Query and result types.

use crate::error::QueryError;
use crate::filters::{ContentTypeFilter, GenreFilter};
use data_loader::CatalogItem;
use serde::{Deserialize, Serialize};

/// Number of recommendations returned when the caller does not say
pub const DEFAULT_TOP_N: usize = 10;

/// One recommendation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendQuery {
    /// Free-text title; matched exactly after trimming and lowercasing
    pub title: String,
    pub genre: GenreFilter,
    pub content_type: ContentTypeFilter,
    pub top_n: usize,
}

impl RecommendQuery {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            genre: GenreFilter::All,
            content_type: ContentTypeFilter::Both,
            top_n: DEFAULT_TOP_N,
        }
    }

    /// Build a query from the raw selector strings of a UI
    ///
    /// Example: `RecommendQuery::parse("Dark", "All", "TV Show", 10)`
    pub fn parse(title: &str, genre: &str, content_type: &str, top_n: usize) -> Result<Self, QueryError> {
        Ok(Self {
            title: title.to_string(),
            genre: GenreFilter::from(genre),
            content_type: content_type.parse()?,
            top_n,
        })
    }

    pub fn with_genre(mut self, genre: GenreFilter) -> Self {
        self.genre = genre;
        self
    }

    pub fn with_content_type(mut self, content_type: ContentTypeFilter) -> Self {
        self.content_type = content_type;
        self
    }

    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.top_n = top_n;
        self
    }

    /// Title as used for matching: trimmed and lowercased
    pub fn normalized_title(&self) -> String {
        self.title.trim().to_lowercase()
    }
}

impl Default for RecommendQuery {
    fn default() -> Self {
        Self::new("")
    }
}

/// A recommended title with the score it was ranked by.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub item: CatalogItem,
    /// Similarity to the anchor in the strategy's matrix
    pub score: f32,
    /// Name of the strategy that produced this result
    pub strategy: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_selectors() {
        let query = RecommendQuery::parse(" Dark ", "all", "TV Show", 5).unwrap();
        assert_eq!(query.genre, GenreFilter::All);
        assert_eq!(query.content_type, ContentTypeFilter::TvShow);
        assert_eq!(query.top_n, 5);
        assert_eq!(query.normalized_title(), "dark");

        let query = RecommendQuery::parse("", "Thrillers", "Both", 10).unwrap();
        assert_eq!(query.genre, GenreFilter::Genre("Thrillers".to_string()));
    }

    #[test]
    fn test_parse_invalid_type() {
        assert_eq!(
            RecommendQuery::parse("Dark", "All", "Podcast", 10),
            Err(QueryError::InvalidContentType("Podcast".to_string()))
        );
    }
}
