//! Query resolution over the catalog and its similarity index.
//!
//! This crate provides:
//! - Filter trait and the content-type / genre filters
//! - FilterPipeline for composing filters
//! - RankingStrategy trait with the title-match and genre-fallback strategies
//! - QueryResolver, which ties them together and orders results by recency
//!
//! ## Architecture
//! A query is processed in stages:
//! 1. Filters narrow the catalog to the eligible ids (order preserved)
//! 2. Strategies are tried in priority order; the first with an anchor ranks
//! 3. The top N are re-ordered by release year, most recent first
//!
//! ## Example Usage
//! ```ignore
//! use pipeline::{QueryResolver, RecommendQuery};
//!
//! let resolver = QueryResolver::default();
//! let query = RecommendQuery::parse("Stranger Things", "All", "TV Show", 10)?;
//! let recommendations = resolver.resolve(&catalog, &index, &query)?;
//! ```

pub mod error;
pub mod traits;
pub mod query;
pub mod filters;
pub mod filter_pipeline;
pub mod strategies;
pub mod ordering;
pub mod resolver;

// Re-export main types
pub use error::QueryError;
pub use filter_pipeline::FilterPipeline;
pub use filters::{ContentTypeFilter, GenreFilter};
pub use query::{RecommendQuery, Recommendation, DEFAULT_TOP_N};
pub use resolver::QueryResolver;
pub use traits::{Filter, QueryContext, RankingStrategy, ScoredId};
