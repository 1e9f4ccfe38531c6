//! Core domain types for the title catalog.
//!
//! This module defines the fundamental data structures used throughout the system.
//! Key Rust concepts demonstrated here:
//! - Type aliases for domain clarity (ItemId)
//! - Structs with public fields
//! - `Option<T>` for values that may be missing (release year)
//! - Derive macros for common traits

use crate::features::FeatureWeights;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

// =============================================================================
// Type Aliases and Constants
// =============================================================================

/// Positional identifier of a catalog row.
///
/// Ids are assigned at load time (0-based) and double as the row/column
/// index into the similarity matrices.
pub type ItemId = usize;

/// Sentinel substituted for any missing text field
pub const UNKNOWN: &str = "Unknown";

/// Poster shown when a record has no image
pub const DEFAULT_PLACEHOLDER_POSTER: &str =
    "https://via.placeholder.com/120x180?text=No+Image&color=333333&textColor=ffffff";

// =============================================================================
// Catalog Item
// =============================================================================

/// One movie or TV show, normalized and with its derived feature text.
///
/// All text fields are guaranteed non-empty after loading: absent values
/// are replaced with [`UNKNOWN`], and an absent poster with the placeholder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub id: ItemId,
    pub title: String,
    /// Lowercased title, used for exact-match lookups
    pub title_lower: String,
    /// Raw comma-separated genres, e.g. "Comedy, Dramas"
    pub genres: String,
    /// First genre token, trimmed
    pub main_genre: String,
    /// Genres with commas replaced by spaces, lowercased
    pub genre_features: String,
    pub director: String,
    pub country: String,
    /// The `type` column ("Movie", "TV Show", ...)
    pub kind: String,
    /// Weighted bag-of-words text fed to the content vectorizer
    pub combined_features: String,
    pub poster_url: String,
    /// Release year, `None` when missing or unparseable
    ///
    /// Unknown years sort after every known year when ordering by recency.
    pub release_year: Option<u16>,
}

impl CatalogItem {
    /// Release year for display ("Unknown" when absent)
    pub fn display_year(&self) -> String {
        self.release_year
            .map(|y| y.to_string())
            .unwrap_or_else(|| UNKNOWN.to_string())
    }
}

impl fmt::Display for CatalogItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.title, self.display_year())
    }
}

/// A record as read from the source, before normalization.
///
/// Every field is optional: a blank cell and a missing cell are treated alike.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    pub title: Option<String>,
    pub genres: Option<String>,
    pub director: Option<String>,
    pub country: Option<String>,
    pub kind: Option<String>,
    pub poster_url: Option<String>,
    pub release_year: Option<String>,
}

// =============================================================================
// Load Options
// =============================================================================

/// Header names of the catalog columns.
///
/// The defaults match the enriched Netflix titles export; other layouts only
/// need a different mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnMapping {
    pub title: String,
    pub genres: String,
    pub director: String,
    pub country: String,
    pub kind: String,
    pub poster_url: String,
    pub release_year: String,
}

impl ColumnMapping {
    /// All column names in field order
    pub fn names(&self) -> [&str; 7] {
        [
            &self.title,
            &self.genres,
            &self.director,
            &self.country,
            &self.kind,
            &self.poster_url,
            &self.release_year,
        ]
    }
}

impl Default for ColumnMapping {
    fn default() -> Self {
        Self {
            title: "title".to_string(),
            genres: "genres".to_string(),
            director: "director".to_string(),
            country: "country".to_string(),
            kind: "type".to_string(),
            poster_url: "poster_url".to_string(),
            release_year: "release_year".to_string(),
        }
    }
}

/// Everything that controls how a catalog is loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoadOptions {
    pub columns: ColumnMapping,
    pub placeholder_poster: String,
    pub weights: FeatureWeights,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            columns: ColumnMapping::default(),
            placeholder_poster: DEFAULT_PLACEHOLDER_POSTER.to_string(),
            weights: FeatureWeights::default(),
        }
    }
}

// =============================================================================
// Catalog - The Immutable In-Memory Store
// =============================================================================

/// The loaded catalog.
///
/// Row order is fixed once built; `items[id].id == id` for every row.
/// There are no mutators: share it behind `Arc<Catalog>` and read.
#[derive(Debug, Clone)]
pub struct Catalog {
    pub(crate) items: Vec<CatalogItem>,
    /// First row id for each lowercased title
    pub(crate) title_index: HashMap<String, ItemId>,
}

impl Catalog {
    /// Get an item by id
    pub fn get(&self, id: ItemId) -> Option<&CatalogItem> {
        self.items.get(id)
    }

    /// All items in catalog order
    ///
    /// Rust concept: `&[T]` is a slice (view into the vector)
    pub fn items(&self) -> &[CatalogItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterate over every id in catalog order
    pub fn ids(&self) -> impl Iterator<Item = ItemId> + '_ {
        self.items.iter().map(|item| item.id)
    }
}
