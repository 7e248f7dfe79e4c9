//! Configuration management module

use anyhow::{Context, Result};
use std::path::Path;

use crate::model::Config;

/// Load the configuration.
///
/// An explicitly given file must exist. The default file
/// (`<config_dir>/lscmd/config.toml`) is optional; when it is missing every
/// setting takes its default value.
pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    match explicit {
        Some(path) => {
            if !path.is_file() {
                anyhow::bail!("Config file not found: {}", path.display());
            }
            Config::load_from(path)
                .with_context(|| format!("Invalid config file: {}", path.display()))
        }
        None => {
            let path = Config::config_path();
            Config::load_from(&path)
                .with_context(|| format!("Invalid config file: {}", path.display()))
        }
    }
}
