//! The similarity index built from a loaded catalog.

use crate::matrix::SimilarityMatrix;
use crate::tfidf::TfidfVectorizer;
use crate::tokenizer::Tokenizer;
use anyhow::{ensure, Result};
use data_loader::{Catalog, ItemId};
use serde::Serialize;
use std::fmt;
use std::time::Instant;
use tracing::info;

/// Which feature representation a score comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SimilarityKind {
    /// Weighted genre/director/type/country text
    Content,
    /// Genre words only
    Genre,
}

impl fmt::Display for SimilarityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimilarityKind::Content => write!(f, "content"),
            SimilarityKind::Genre => write!(f, "genre"),
        }
    }
}

/// Both similarity matrices for a catalog.
///
/// Built once at startup and never mutated; share it behind `Arc`.
/// Matrices are sized against the full catalog, so every catalog id is a
/// valid row and column.
#[derive(Debug, Clone)]
pub struct SimilarityIndex {
    content: SimilarityMatrix,
    genre: SimilarityMatrix,
    content_vocabulary: usize,
    genre_vocabulary: usize,
}

impl SimilarityIndex {
    /// Vectorize the catalog's feature columns and compute both matrices
    ///
    /// Content features drop English stop words; genre features keep
    /// every token.
    pub fn build(catalog: &Catalog) -> Self {
        let start = Instant::now();

        let combined: Vec<&str> = catalog
            .items()
            .iter()
            .map(|item| item.combined_features.as_str())
            .collect();
        let genres: Vec<&str> = catalog
            .items()
            .iter()
            .map(|item| item.genre_features.as_str())
            .collect();

        let content_tfidf = TfidfVectorizer::new(Tokenizer::with_stop_words()).fit_transform(&combined);
        let genre_tfidf = TfidfVectorizer::new(Tokenizer::new()).fit_transform(&genres);

        let index = Self {
            content: SimilarityMatrix::cosine(&content_tfidf.rows),
            genre: SimilarityMatrix::cosine(&genre_tfidf.rows),
            content_vocabulary: content_tfidf.vocabulary.len(),
            genre_vocabulary: genre_tfidf.vocabulary.len(),
        };

        info!(
            "Built similarity index for {} titles ({} content terms, {} genre terms) in {:?}",
            catalog.len(),
            index.content_vocabulary,
            index.genre_vocabulary,
            start.elapsed()
        );
        index
    }

    /// Assemble an index from precomputed matrices
    pub fn from_matrices(content: SimilarityMatrix, genre: SimilarityMatrix) -> Result<Self> {
        ensure!(
            content.len() == genre.len(),
            "Matrix sizes differ: content {} vs genre {}",
            content.len(),
            genre.len()
        );
        Ok(Self {
            content,
            genre,
            content_vocabulary: 0,
            genre_vocabulary: 0,
        })
    }

    pub fn content(&self) -> &SimilarityMatrix {
        &self.content
    }

    pub fn genre(&self) -> &SimilarityMatrix {
        &self.genre
    }

    pub fn matrix(&self, kind: SimilarityKind) -> &SimilarityMatrix {
        match kind {
            SimilarityKind::Content => &self.content,
            SimilarityKind::Genre => &self.genre,
        }
    }

    /// Score between two ids in the chosen matrix
    pub fn score(&self, kind: SimilarityKind, a: ItemId, b: ItemId) -> Option<f32> {
        self.matrix(kind).get(a, b)
    }

    /// Number of catalog rows covered
    pub fn len(&self) -> usize {
        self.content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// `(content, genre)` vocabulary sizes
    pub fn vocabulary_sizes(&self) -> (usize, usize) {
        (self.content_vocabulary, self.genre_vocabulary)
    }
}
