//! CLI subcommands.

pub mod config;
pub mod parse;
pub mod preprocess;
pub mod summary;

use std::path::Path;

use chintai_core::ChintaiConfig;
use tracing::debug;

/// Load the config from an explicit path, else the default location, else
/// built-in defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<ChintaiConfig> {
    if let Some(path) = config_path {
        return Ok(ChintaiConfig::from_file(Path::new(path))?);
    }

    let default_path = config::default_config_path();
    if default_path.exists() {
        debug!("Using config from {}", default_path.display());
        Ok(ChintaiConfig::from_file(&default_path)?)
    } else {
        Ok(ChintaiConfig::default())
    }
}
