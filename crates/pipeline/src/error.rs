//! Error types for query parsing.

use thiserror::Error;

/// A selector string that does not name a valid option.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    #[error("Invalid content type '{0}' (expected Both, Movie or TV Show)")]
    InvalidContentType(String),
}
