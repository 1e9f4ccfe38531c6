//! Filter by content type (movie or TV show).

use crate::error::QueryError;
use crate::traits::Filter;
use anyhow::Result;
use data_loader::{Catalog, ItemId};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which kinds of title a query accepts.
///
/// Matching is exact against the catalog's `type` column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContentTypeFilter {
    #[default]
    Both,
    Movie,
    TvShow,
}

impl ContentTypeFilter {
    /// Choices for a type selector, in display order
    pub const OPTIONS: [ContentTypeFilter; 3] = [Self::Both, Self::Movie, Self::TvShow];

    /// The catalog `type` value this filter keeps (`None` keeps everything)
    pub fn catalog_value(&self) -> Option<&'static str> {
        match self {
            Self::Both => None,
            Self::Movie => Some("Movie"),
            Self::TvShow => Some("TV Show"),
        }
    }
}

impl fmt::Display for ContentTypeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.catalog_value().unwrap_or("Both"))
    }
}

impl FromStr for ContentTypeFilter {
    type Err = QueryError;

    /// Example: "tv show" -> TvShow, "Both" -> Both
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "both" => Ok(Self::Both),
            "movie" => Ok(Self::Movie),
            "tv show" => Ok(Self::TvShow),
            _ => Err(QueryError::InvalidContentType(s.to_string())),
        }
    }
}

impl Filter for ContentTypeFilter {
    fn name(&self) -> &str {
        "ContentTypeFilter"
    }

    fn apply(&self, candidates: Vec<ItemId>, catalog: &Catalog) -> Result<Vec<ItemId>> {
        let Some(kind) = self.catalog_value() else {
            return Ok(candidates);
        };

        let filtered = candidates
            .into_iter()
            .filter(|&id| catalog.get(id).is_some_and(|item| item.kind == kind))
            .collect();
        Ok(filtered)
    }
}
