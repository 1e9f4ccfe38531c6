//! TF-IDF vectorization.
//!
//! ## Algorithm
//! 1. Tokenize every document and collect the vocabulary (sorted, so term
//!    indices are deterministic)
//! 2. Count document frequency per term
//! 3. idf = ln((1 + n) / (1 + df)) + 1 (smoothed, never zero)
//! 4. Row weight = raw count * idf, then L2-normalize each row
//!
//! The vocabulary comes from the corpus alone; there is no external model.

use crate::tokenizer::Tokenizer;
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, warn};

/// A sparse row: parallel term indices (ascending) and weights.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseVector {
    indices: Vec<usize>,
    values: Vec<f64>,
}

impl SparseVector {
    /// Build from `(term index, weight)` pairs in any order
    ///
    /// Zero weights are dropped; duplicate indices are summed.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (usize, f64)>) -> Self {
        let mut merged: BTreeMap<usize, f64> = BTreeMap::new();
        for (idx, value) in pairs {
            *merged.entry(idx).or_insert(0.0) += value;
        }
        let (indices, values) = merged.into_iter().filter(|(_, v)| *v != 0.0).unzip();
        Self { indices, values }
    }

    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Number of non-zero entries
    pub fn nnz(&self) -> usize {
        self.indices.len()
    }

    pub fn is_zero(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn norm(&self) -> f64 {
        self.values.iter().map(|v| v * v).sum::<f64>().sqrt()
    }

    /// Dot product by merging the two sorted index lists
    pub fn dot(&self, other: &SparseVector) -> f64 {
        let (mut i, mut j) = (0, 0);
        let mut sum = 0.0;
        while i < self.indices.len() && j < other.indices.len() {
            match self.indices[i].cmp(&other.indices[j]) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    sum += self.values[i] * other.values[j];
                    i += 1;
                    j += 1;
                }
            }
        }
        sum
    }

    /// Scale to unit length (no-op for the zero vector)
    fn normalize(&mut self) {
        let norm = self.norm();
        if norm > 0.0 {
            for v in &mut self.values {
                *v /= norm;
            }
        }
    }
}

/// Output of [`TfidfVectorizer::fit_transform`].
#[derive(Debug, Clone)]
pub struct TfidfMatrix {
    /// Terms in index order (alphabetical)
    pub vocabulary: Vec<String>,
    /// Inverse document frequency per term index
    pub idf: Vec<f64>,
    /// One L2-normalized row per document
    pub rows: Vec<SparseVector>,
}

impl TfidfMatrix {
    pub fn term_index(&self, term: &str) -> Option<usize> {
        self.vocabulary.binary_search_by(|t| t.as_str().cmp(term)).ok()
    }
}

/// Fits a vocabulary on a corpus and produces TF-IDF rows.
#[derive(Debug, Clone, Copy, Default)]
pub struct TfidfVectorizer {
    tokenizer: Tokenizer,
}

impl TfidfVectorizer {
    pub fn new(tokenizer: Tokenizer) -> Self {
        Self { tokenizer }
    }

    /// Learn the vocabulary and idf from `docs` and vectorize them
    ///
    /// A corpus with no usable terms yields all-zero rows.
    pub fn fit_transform<S: AsRef<str>>(&self, docs: &[S]) -> TfidfMatrix {
        let tokenized: Vec<Vec<String>> = docs
            .iter()
            .map(|doc| self.tokenizer.tokenize(doc.as_ref()))
            .collect();

        // Term -> document frequency, sorted for stable indices
        let mut doc_freq: BTreeMap<&str, usize> = BTreeMap::new();
        for tokens in &tokenized {
            let mut seen: Vec<&str> = tokens.iter().map(String::as_str).collect();
            seen.sort_unstable();
            seen.dedup();
            for term in seen {
                *doc_freq.entry(term).or_insert(0) += 1;
            }
        }

        if doc_freq.is_empty() {
            warn!("Empty vocabulary over {} documents", docs.len());
        }

        let n = docs.len() as f64;
        let vocabulary: Vec<String> = doc_freq.keys().map(|t| t.to_string()).collect();
        let idf: Vec<f64> = doc_freq
            .values()
            .map(|&df| ((1.0 + n) / (1.0 + df as f64)).ln() + 1.0)
            .collect();
        let term_to_index: HashMap<&str, usize> = doc_freq
            .keys()
            .enumerate()
            .map(|(idx, term)| (*term, idx))
            .collect();

        let rows = tokenized
            .iter()
            .map(|tokens| {
                let mut row = SparseVector::from_pairs(tokens.iter().map(|token| {
                    let idx = term_to_index[token.as_str()];
                    (idx, idf[idx])
                }));
                row.normalize();
                row
            })
            .collect();

        debug!(
            "Fitted TF-IDF: {} documents, {} terms, stop words {}",
            docs.len(),
            vocabulary.len(),
            if self.tokenizer.removes_stop_words() { "on" } else { "off" }
        );

        TfidfMatrix {
            vocabulary,
            idf,
            rows,
        }
    }
}
