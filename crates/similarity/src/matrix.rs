//! Dense pairwise cosine similarity.
//!
//! Scores are stored row-major as `f32` to halve memory on large catalogs;
//! they are computed in `f64`.

use crate::tfidf::SparseVector;
use anyhow::{bail, Result};
use data_loader::ItemId;
use rayon::prelude::*;

/// Square, symmetric matrix of similarity scores in `[0, 1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct SimilarityMatrix {
    size: usize,
    scores: Vec<f32>,
}

impl SimilarityMatrix {
    /// Pairwise cosine similarity of every pair of rows
    ///
    /// Rows are computed in parallel. The diagonal is exactly 1.0 for
    /// non-zero vectors; any pair involving a zero vector scores 0.0.
    pub fn cosine(vectors: &[SparseVector]) -> Self {
        let size = vectors.len();
        let norms: Vec<f64> = vectors.iter().map(SparseVector::norm).collect();
        let mut scores = vec![0.0f32; size * size];

        if size > 0 {
            scores.par_chunks_mut(size).enumerate().for_each(|(i, row)| {
                if norms[i] == 0.0 {
                    return;
                }
                for (j, cell) in row.iter_mut().enumerate() {
                    *cell = if i == j {
                        1.0
                    } else {
                        cosine(&vectors[i], norms[i], &vectors[j], norms[j])
                    };
                }
            });
        }

        Self { size, scores }
    }

    /// Build from explicit rows, checking that the result is square
    pub fn from_rows(rows: Vec<Vec<f32>>) -> Result<Self> {
        let size = rows.len();
        let mut scores = Vec::with_capacity(size * size);
        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != size {
                bail!("Row {} has {} columns, expected {}", i, row.len(), size);
            }
            scores.extend(row);
        }
        Ok(Self { size, scores })
    }

    /// Number of rows (and columns)
    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Score between two ids, `None` when either is out of range
    pub fn get(&self, i: ItemId, j: ItemId) -> Option<f32> {
        if i < self.size && j < self.size {
            Some(self.scores[i * self.size + j])
        } else {
            None
        }
    }

    /// Full similarity row of one id
    pub fn row(&self, i: ItemId) -> Option<&[f32]> {
        (i < self.size).then(|| &self.scores[i * self.size..(i + 1) * self.size])
    }
}

/// `dot(u, v) / (|u| |v|)`, clamped to `[0, 1]`
fn cosine(u: &SparseVector, u_norm: f64, v: &SparseVector, v_norm: f64) -> f32 {
    if u_norm == 0.0 || v_norm == 0.0 {
        return 0.0;
    }
    (u.dot(v) / (u_norm * v_norm)).clamp(0.0, 1.0) as f32
}
