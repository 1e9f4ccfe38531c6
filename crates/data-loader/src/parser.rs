//! Parser for catalog CSV files.
//!
//! The source is a CSV file with a header row; the header names to read are
//! taken from a [`ColumnMapping`]. Extra columns are ignored.
//!
//! Rust concepts you'll learn here:
//! - Generic readers (`R: Read`) so files and in-memory buffers share one path
//! - Error handling with `?` and `#[from]` conversions
//! - Converting between types (parsing strings to numbers)

use crate::error::{DataLoadError, Result};
use crate::types::*;
use csv::{ReaderBuilder, StringRecord};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// Header positions of the mapped columns
struct ColumnPositions {
    title: usize,
    genres: usize,
    director: usize,
    country: usize,
    kind: usize,
    poster_url: usize,
    release_year: usize,
}

impl ColumnPositions {
    fn resolve(headers: &StringRecord, columns: &ColumnMapping) -> Result<Self> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim() == name)
                .ok_or_else(|| DataLoadError::MissingColumn {
                    column: name.to_string(),
                })
        };

        Ok(Self {
            title: find(&columns.title)?,
            genres: find(&columns.genres)?,
            director: find(&columns.director)?,
            country: find(&columns.country)?,
            kind: find(&columns.kind)?,
            poster_url: find(&columns.poster_url)?,
            release_year: find(&columns.release_year)?,
        })
    }
}

/// Parse a catalog CSV file into raw records
pub fn parse_catalog_file(path: &Path, columns: &ColumnMapping) -> Result<Vec<RawRecord>> {
    let file = File::open(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => DataLoadError::FileNotFound {
            path: path.display().to_string(),
        },
        _ => DataLoadError::IoError(e),
    })?;
    parse_catalog(file, columns)
}

/// Parse catalog CSV data from any reader
///
/// Rows shorter than the header are accepted; their missing cells read as
/// absent values.
pub fn parse_catalog<R: Read>(reader: R, columns: &ColumnMapping) -> Result<Vec<RawRecord>> {
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let positions = ColumnPositions::resolve(csv_reader.headers()?, columns)?;

    let mut records = Vec::new();
    for row in csv_reader.records() {
        let row = row?;
        let cell = |idx: usize| non_blank(row.get(idx));

        records.push(RawRecord {
            title: cell(positions.title),
            genres: cell(positions.genres),
            director: cell(positions.director),
            country: cell(positions.country),
            kind: cell(positions.kind),
            poster_url: cell(positions.poster_url),
            release_year: cell(positions.release_year),
        });
    }

    debug!("Parsed {} catalog rows", records.len());
    Ok(records)
}

/// Treat blank cells the same as missing ones
fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .filter(|v| !v.trim().is_empty())
        .map(|v| v.to_string())
}

/// Parse a release year cell
///
/// Spreadsheet exports often write years as floats ("2019.0"), so both
/// integer and float forms are accepted.
///
/// Example: "2019" -> Some(2019)
///          "2019.0" -> Some(2019)
///          "Unknown" -> None
pub fn parse_release_year(value: &str) -> Option<u16> {
    let value = value.trim();
    if let Ok(year) = value.parse::<u16>() {
        return Some(year);
    }
    let float: f64 = value.parse().ok()?;
    if float.is_finite() && float.fract() == 0.0 && (0.0..=u16::MAX as f64).contains(&float) {
        Some(float as u16)
    } else {
        None
    }
}
