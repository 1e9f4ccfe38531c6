//! Recommender configuration.

use anyhow::{Context, Result};
use data_loader::LoadOptions;
use pipeline::DEFAULT_TOP_N;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Default catalog location, relative to the working directory
pub const DEFAULT_CATALOG_PATH: &str = "data/movies_with_posters.csv";

/// Everything needed to start a [`Recommender`](crate::Recommender).
///
/// Missing keys in a JSON config fall back to their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecommenderConfig {
    pub catalog_path: PathBuf,
    /// Results per query when the caller does not say
    pub default_top_n: usize,
    pub load: LoadOptions,
}

impl RecommenderConfig {
    pub fn new(catalog_path: impl Into<PathBuf>) -> Self {
        Self {
            catalog_path: catalog_path.into(),
            ..Self::default()
        }
    }

    /// Read a JSON config file
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("Invalid config {}", path.display()))
    }
}

impl Default for RecommenderConfig {
    fn default() -> Self {
        Self {
            catalog_path: PathBuf::from(DEFAULT_CATALOG_PATH),
            default_top_n: DEFAULT_TOP_N,
            load: LoadOptions::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let config = RecommenderConfig::default();
        assert_eq!(config.default_top_n, 10);
        assert_eq!(config.load.weights.genre, 3);
        assert_eq!(config.catalog_path, PathBuf::from(DEFAULT_CATALOG_PATH));
    }

    #[test]
    fn test_partial_json() -> Result<()> {
        let mut file = NamedTempFile::new()?;
        writeln!(file, r#"{{ "catalog_path": "titles.csv", "default_top_n": 5 }}"#)?;

        let config = RecommenderConfig::from_json_file(file.path())?;
        assert_eq!(config.catalog_path, PathBuf::from("titles.csv"));
        assert_eq!(config.default_top_n, 5);
        assert_eq!(config.load, LoadOptions::default());
        Ok(())
    }

    #[test]
    fn test_partial_load_options() -> Result<()> {
        let mut file = NamedTempFile::new()?;
        writeln!(
            file,
            r#"{{ "load": {{ "placeholder_poster": "http://x/none.png", "columns": {{ "title": "name" }}, "weights": {{ "country": 0 }} }} }}"#
        )?;

        let config = RecommenderConfig::from_json_file(file.path())?;
        assert_eq!(config.load.placeholder_poster, "http://x/none.png");
        assert_eq!(config.load.columns.title, "name");
        assert_eq!(config.load.columns.kind, "type");
        assert_eq!(config.load.columns.release_year, "release_year");
        assert_eq!(config.load.weights.country, 0);
        assert_eq!(config.load.weights.genre, 3);
        assert_eq!(config.load.weights.kind, 2);
        assert_eq!(config.default_top_n, 10);
        Ok(())
    }

    #[test]
    fn test_invalid_json() -> Result<()> {
        let mut file = NamedTempFile::new()?;
        writeln!(file, "not json")?;
        assert!(RecommenderConfig::from_json_file(file.path()).is_err());
        Ok(())
    }
}
