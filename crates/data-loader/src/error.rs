//! Error types for the data-loader crate.
//!
//! Rust error handling concepts demonstrated:
//! - thiserror for defining custom error types
//! - `#[from]` conversions so `?` works on io and csv errors
//! - Error messages with context

use thiserror::Error;

/// Errors that can occur while loading the catalog.
///
/// Every variant is fatal at startup: without a catalog there is nothing
/// to recommend. Individual malformed cells never surface here, they are
/// repaired with sentinel values during normalization.
#[derive(Error, Debug)]
pub enum DataLoadError {
    /// Catalog file could not be found
    #[error("Failed to open file: {path}")]
    FileNotFound { path: String },

    /// I/O error occurred while reading the catalog
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// The CSV reader rejected the input (bad quoting, ragged rows, ...)
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A configured column is absent from the header row
    #[error("Missing column '{column}' in catalog header")]
    MissingColumn { column: String },

    /// The source parsed fine but held no rows
    #[error("Catalog is empty")]
    EmptyCatalog,

    /// A configuration value had an invalid value
    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: String, value: String },
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, DataLoadError>;
