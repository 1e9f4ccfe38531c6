//! Filter implementations for the query pipeline.
//!
//! Each selector in a query doubles as a [`Filter`](crate::Filter), so a
//! query's filter stage is just its selectors chained in a FilterPipeline.

pub mod content_type;
pub mod genre;

// Re-export for convenience
pub use content_type::ContentTypeFilter;
pub use genre::GenreFilter;
