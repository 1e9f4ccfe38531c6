//! Feature text derivation.
//!
//! Two textual representations are produced per item:
//! - `genre_features`: the genre list as space-separated lowercase words
//! - `combined_features`: genre, director, type and country repeated by
//!   weight, so a bag-of-words vectorizer counts them proportionally
//!
//! Everything here is a pure function of its inputs.

use serde::{Deserialize, Serialize};

/// Relative weight of each field in `combined_features`.
///
/// Weights are applied by repetition: a field with weight 3 is written
/// three times. Changing the ratio changes recommendation quality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureWeights {
    pub genre: usize,
    pub director: usize,
    pub kind: usize,
    pub country: usize,
}

impl Default for FeatureWeights {
    fn default() -> Self {
        Self {
            genre: 3,
            director: 3,
            kind: 2,
            country: 1,
        }
    }
}

/// Fields needed to build the combined feature text.
#[derive(Debug, Clone, Copy)]
pub struct FeatureSource<'a> {
    pub genre_features: &'a str,
    pub director: &'a str,
    pub kind: &'a str,
    pub country: &'a str,
}

/// Genres with commas replaced by spaces, lowercased
///
/// Example: "Comedy,Drama" -> "comedy drama"
pub fn genre_features(genres: &str) -> String {
    genres.replace(',', " ").to_lowercase()
}

/// First comma-separated genre, trimmed
///
/// Example: "Crime TV Shows, Thrillers" -> "Crime TV Shows"
pub fn main_genre(genres: &str) -> String {
    genres.split(',').next().unwrap_or_default().trim().to_string()
}

/// Build the weighted combined feature text
///
/// Each field is followed by a single space and repeated `weight` times:
/// `(genre " ")*3 + (director " ")*3 + (type " ")*2 + (country " ")*1`
/// with the default weights.
pub fn combined_features(source: &FeatureSource<'_>, weights: &FeatureWeights) -> String {
    let parts = [
        (source.genre_features, weights.genre),
        (source.director, weights.director),
        (source.kind, weights.kind),
        (source.country, weights.country),
    ];

    let capacity = parts.iter().map(|(text, n)| (text.len() + 1) * n).sum();
    let mut out = String::with_capacity(capacity);
    for (text, repeat) in parts {
        for _ in 0..repeat {
            out.push_str(text);
            out.push(' ');
        }
    }
    out
}
