//! # Similarity Crate
//!
//! Content-based similarity over the catalog's feature text.
//!
//! ## Components
//!
//! - **tokenizer**: Lowercase word tokenization with optional stop words
//! - **tfidf**: Corpus-fitted TF-IDF vectorizer producing sparse rows
//! - **matrix**: Dense pairwise cosine similarity, computed with rayon
//! - **index**: The two matrices (content, genre) for a whole catalog
//!
//! ## Example Usage
//!
//! ```ignore
//! use similarity::{SimilarityIndex, SimilarityKind};
//!
//! let index = SimilarityIndex::build(&catalog);
//! let score = index.score(SimilarityKind::Content, 0, 1);
//! ```
//!
//! Building is O(n² · v) and happens once; queries only read the matrices.

pub mod tokenizer;
pub mod tfidf;
pub mod matrix;
pub mod index;

pub use index::{SimilarityIndex, SimilarityKind};
pub use matrix::SimilarityMatrix;
pub use tfidf::{SparseVector, TfidfMatrix, TfidfVectorizer};
pub use tokenizer::Tokenizer;
