//! Catalog building and lookup logic.
//!
//! This module turns parsed records into the immutable [`Catalog`]:
//! - Normalize missing fields to sentinels
//! - Derive lowercase title and feature columns
//! - Build the title lookup index
//!
//! Rust concepts you'll learn:
//! - Iterator methods (map, filter, enumerate, collect)
//! - Entry API for HashMap
//! - BTreeSet for sorted, de-duplicated values

use crate::error::{DataLoadError, Result};
use crate::features::{self, FeatureSource};
use crate::parser;
use crate::types::*;
use std::collections::{BTreeSet, HashMap};
use std::io::Read;
use std::path::Path;
use std::time::Instant;
use tracing::info;

/// Value of the genre selector that disables genre filtering
pub const ALL_GENRES: &str = "All";

impl Catalog {
    /// Load the catalog from a CSV file
    ///
    /// This is the main entry point for loading data. Call it once at
    /// startup and share the result; nothing re-reads the file afterwards.
    ///
    /// Steps:
    /// 1. Validate the load options
    /// 2. Parse the CSV into raw records
    /// 3. Normalize records and derive feature columns
    pub fn load_from_file(path: &Path, options: &LoadOptions) -> Result<Self> {
        info!("Loading catalog from {:?}", path);
        let start = Instant::now();

        validate_options(options)?;
        let records = parser::parse_catalog_file(path, &options.columns)?;
        let catalog = Self::from_records(records, options)?;

        info!(
            "Loaded {} titles in {:?}",
            catalog.len(),
            start.elapsed()
        );
        Ok(catalog)
    }

    /// Load the catalog from any reader producing CSV
    pub fn from_reader<R: Read>(reader: R, options: &LoadOptions) -> Result<Self> {
        validate_options(options)?;
        let records = parser::parse_catalog(reader, &options.columns)?;
        Self::from_records(records, options)
    }

    /// Build a catalog from already-parsed records
    ///
    /// Ids are assigned by position. An empty record list is an error:
    /// a catalog with no rows cannot serve any query.
    pub fn from_records(records: Vec<RawRecord>, options: &LoadOptions) -> Result<Self> {
        if records.is_empty() {
            return Err(DataLoadError::EmptyCatalog);
        }

        let items: Vec<CatalogItem> = records
            .into_iter()
            .enumerate()
            .map(|(id, record)| normalize_record(id, record, options))
            .collect();

        let mut title_index = HashMap::with_capacity(items.len());
        for item in &items {
            // Keep the first row for duplicate titles
            title_index.entry(item.title_lower.clone()).or_insert(item.id);
        }

        Ok(Self { items, title_index })
    }

    /// Find the first item whose title matches exactly (case-insensitive)
    ///
    /// The query is trimmed and lowercased before lookup.
    pub fn find_by_title(&self, title: &str) -> Option<&CatalogItem> {
        let key = title.trim().to_lowercase();
        if key.is_empty() {
            return None;
        }
        self.title_index.get(&key).and_then(|&id| self.get(id))
    }

    /// Search titles by case-insensitive substring
    ///
    /// Exact matches come first, then substring matches, each group in
    /// catalog order.
    pub fn search_titles(&self, query: &str) -> Vec<&CatalogItem> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }

        let (mut exact, partial): (Vec<&CatalogItem>, Vec<&CatalogItem>) = self
            .items
            .iter()
            .filter(|item| item.title_lower.contains(&needle))
            .partition(|item| item.title_lower == needle);

        exact.extend(partial);
        exact
    }

    /// Distinct main genres, sorted
    pub fn main_genres(&self) -> Vec<String> {
        self.items
            .iter()
            .map(|item| item.main_genre.as_str())
            .filter(|genre| !genre.is_empty())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    /// Choices for a genre selector: "All" followed by the main genres
    pub fn genre_options(&self) -> Vec<String> {
        let mut options = vec![ALL_GENRES.to_string()];
        options.extend(self.main_genres());
        options
    }
}

/// Reject column mappings that cannot select distinct columns
fn validate_options(options: &LoadOptions) -> Result<()> {
    let names = options.columns.names();
    for (i, name) in names.iter().enumerate() {
        if name.trim().is_empty() {
            return Err(DataLoadError::InvalidValue {
                field: "column name".to_string(),
                value: format!("{name:?}"),
            });
        }
        if names[..i].contains(name) {
            return Err(DataLoadError::InvalidValue {
                field: "column name".to_string(),
                value: format!("{name} (mapped twice)"),
            });
        }
    }
    Ok(())
}

/// Turn a raw record into a catalog item
///
/// Missing text becomes "Unknown", a missing poster becomes the
/// placeholder, and an unparseable year becomes `None`.
fn normalize_record(id: ItemId, record: RawRecord, options: &LoadOptions) -> CatalogItem {
    let or_unknown = |value: Option<String>| value.unwrap_or_else(|| UNKNOWN.to_string());

    let title = or_unknown(record.title);
    let genres = or_unknown(record.genres);
    let director = or_unknown(record.director);
    let country = or_unknown(record.country);
    let kind = or_unknown(record.kind);
    let poster_url = record
        .poster_url
        .unwrap_or_else(|| options.placeholder_poster.clone());
    let release_year = record
        .release_year
        .as_deref()
        .and_then(parser::parse_release_year);

    let genre_features = features::genre_features(&genres);
    let combined_features = features::combined_features(
        &FeatureSource {
            genre_features: &genre_features,
            director: &director,
            kind: &kind,
            country: &country,
        },
        &options.weights,
    );

    CatalogItem {
        id,
        title_lower: title.to_lowercase(),
        main_genre: features::main_genre(&genres),
        title,
        genres,
        genre_features,
        director,
        country,
        kind,
        combined_features,
        poster_url,
        release_year,
    }
}
