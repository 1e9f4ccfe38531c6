//! # Data Loader Crate
//!
//! This crate loads the title catalog and derives the text features the
//! similarity index is built from.
//!
//! ## Main Components
//!
//! - **types**: Core domain types (CatalogItem, Catalog, LoadOptions)
//! - **parser**: Parse CSV rows into raw records
//! - **features**: Derive genre and weighted combined feature text
//! - **index**: Normalize records and build the Catalog with lookups
//! - **error**: Error types for data loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use data_loader::{Catalog, LoadOptions};
//! use std::path::Path;
//!
//! // Load the entire catalog once
//! let catalog = Catalog::load_from_file(Path::new("data/movies_with_posters.csv"), &LoadOptions::default())?;
//!
//! // Query data
//! let item = catalog.find_by_title("Stranger Things").unwrap();
//! println!("{} is a {} from {}", item.title, item.kind, item.country);
//! ```

// Public modules
pub mod error;
pub mod types;
pub mod parser;
pub mod features;
pub mod index;

// Re-export commonly used types for convenience
pub use error::{DataLoadError, Result};
pub use features::FeatureWeights;
pub use index::ALL_GENRES;
pub use types::{
    // Type aliases and constants
    ItemId,
    DEFAULT_PLACEHOLDER_POSTER,
    UNKNOWN,
    // Core types
    Catalog,
    CatalogItem,
    ColumnMapping,
    LoadOptions,
    RawRecord,
};

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_from_file() -> anyhow::Result<()> {
        let mut temp_file = NamedTempFile::new()?;
        writeln!(temp_file, "title,genres,director,country,type,poster_url,release_year")?;
        writeln!(temp_file, "Alpha,\"Action,Thriller\",X,US,Movie,http://p/a.jpg,2020")?;
        writeln!(temp_file, "Beta,Comedy,,,TV Show,,")?;

        let catalog = Catalog::load_from_file(temp_file.path(), &LoadOptions::default())?;

        assert_eq!(catalog.len(), 2);
        let alpha = catalog.get(0).unwrap();
        assert_eq!(alpha.main_genre, "Action");
        assert_eq!(alpha.genre_features, "action thriller");
        assert_eq!(
            alpha.combined_features,
            "action thriller action thriller action thriller X X X Movie Movie US "
        );

        let beta = catalog.get(1).unwrap();
        assert_eq!(beta.director, UNKNOWN);
        assert_eq!(beta.poster_url, DEFAULT_PLACEHOLDER_POSTER);
        assert_eq!(beta.release_year, None);
        Ok(())
    }

    #[test]
    fn test_load_header_only_is_empty() -> anyhow::Result<()> {
        let mut temp_file = NamedTempFile::new()?;
        writeln!(temp_file, "title,genres,director,country,type,poster_url,release_year")?;

        let err = Catalog::load_from_file(temp_file.path(), &LoadOptions::default()).unwrap_err();
        assert!(matches!(err, DataLoadError::EmptyCatalog));
        Ok(())
    }
}
