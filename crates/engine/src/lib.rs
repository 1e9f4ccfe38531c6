//! Engine crate for the ReelMatch recommender.
//!
//! This crate owns startup (load the catalog, build the similarity index)
//! and exposes the query API used by the CLI.

pub mod config;
pub mod recommender;

pub use config::RecommenderConfig;
pub use recommender::{PairSimilarity, Recommender};
