//! Filter by genre.
//!
//! A genre matches when its lowercase text appears anywhere in the item's
//! genre feature text, so "Comedy" matches "Comedy,Drama" and
//! "Comedies" matches "Stand-Up Comedy, Comedies".

use crate::traits::Filter;
use anyhow::Result;
use data_loader::{Catalog, ItemId, ALL_GENRES};
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// The genre selector of a query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GenreFilter {
    /// No genre restriction
    #[default]
    All,
    /// Keep items whose genre text contains this (case-insensitive)
    Genre(String),
}

impl GenreFilter {
    pub fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }

    /// Does this genre text pass the filter?
    pub fn matches(&self, genre_features: &str) -> bool {
        match self {
            Self::All => true,
            Self::Genre(genre) => genre_features
                .to_lowercase()
                .contains(&genre.to_lowercase()),
        }
    }
}

impl fmt::Display for GenreFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str(ALL_GENRES),
            Self::Genre(genre) => f.write_str(genre),
        }
    }
}

impl From<&str> for GenreFilter {
    /// "All" in any case selects everything; any other text is a genre
    fn from(s: &str) -> Self {
        if s.trim().eq_ignore_ascii_case(ALL_GENRES) {
            Self::All
        } else {
            Self::Genre(s.to_string())
        }
    }
}

impl FromStr for GenreFilter {
    type Err = Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}

impl Filter for GenreFilter {
    fn name(&self) -> &str {
        "GenreFilter"
    }

    fn apply(&self, candidates: Vec<ItemId>, catalog: &Catalog) -> Result<Vec<ItemId>> {
        if self.is_all() {
            return Ok(candidates);
        }

        let filtered = candidates
            .into_iter()
            .filter(|&id| {
                catalog
                    .get(id)
                    .is_some_and(|item| self.matches(&item.genre_features))
            })
            .collect();
        Ok(filtered)
    }
}
