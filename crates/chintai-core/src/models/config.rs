//! Configuration structures for the preprocessing pipeline.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::models::listing::NAME;
use crate::parse::DEFAULT_UNDERGROUND_CAP;

/// Main configuration for chintai.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChintaiConfig {
    /// Data directory layout.
    pub data: DataConfig,

    /// Pipeline behaviour.
    pub pipeline: PipelineConfig,
}

/// Where raw and interim datasets live.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Root data directory.
    pub data_dir: PathBuf,

    /// Subdirectory of `data_dir` holding scraped per-district files.
    pub raw_dir: String,

    /// Subdirectory of `data_dir` receiving preprocessed output.
    pub interim_dir: String,

    /// File name prefix stripped to obtain the district ("suumo_港区.csv").
    pub file_prefix: String,

    /// Extension of raw files.
    pub extension: String,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            raw_dir: "raw".to_string(),
            interim_dir: "interim".to_string(),
            file_prefix: "suumo_".to_string(),
            extension: "csv".to_string(),
        }
    }
}

impl DataConfig {
    /// Directory holding the raw files of one scrape.
    pub fn raw_path(&self, load_dir: &str) -> PathBuf {
        self.data_dir.join(&self.raw_dir).join(load_dir)
    }

    pub fn interim_dir_path(&self) -> PathBuf {
        self.data_dir.join(&self.interim_dir)
    }

    /// Output file for a preprocessing run.
    pub fn interim_path(&self, save_path: &str) -> PathBuf {
        self.interim_dir_path().join(save_path)
    }
}

/// Pipeline configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Columns removed before any parsing. Absent ones are ignored.
    pub drop_columns: Vec<String>,

    /// Number of `location{i}` columns per listing.
    pub commute_legs: usize,

    /// Maximum stories counted for one underground segment.
    pub underground_cap: u32,

    /// One-hot encode the architecture column.
    pub encode_architecture: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            // Unnamed index column as written by pandas, and the listing title
            drop_columns: vec![
                String::new(),
                "Unnamed: 0".to_string(),
                NAME.to_string(),
            ],
            commute_legs: 3,
            underground_cap: DEFAULT_UNDERGROUND_CAP,
            encode_architecture: true,
        }
    }
}

impl ChintaiConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })?;
        std::fs::write(path, content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_paths() {
        let config = ChintaiConfig::default();
        assert_eq!(
            config.data.raw_path("2024-05"),
            PathBuf::from("data").join("raw").join("2024-05")
        );
        assert_eq!(
            config.data.interim_path("preprocessed.csv"),
            PathBuf::from("data").join("interim").join("preprocessed.csv")
        );
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: ChintaiConfig =
            serde_json::from_str(r#"{"data": {"data_dir": "/srv/suumo"}}"#).unwrap();
        assert_eq!(config.data.data_dir, PathBuf::from("/srv/suumo"));
        assert_eq!(config.data.file_prefix, "suumo_");
        assert_eq!(config.pipeline.commute_legs, 3);
        assert_eq!(config.pipeline.underground_cap, 2);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = ChintaiConfig::default();
        config.pipeline.underground_cap = 1;
        config.save(&path).unwrap();

        assert_eq!(ChintaiConfig::from_file(&path).unwrap(), config);
    }
}
