//! Application configuration structures

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::Dialect;

/// Main configuration structure
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub scan: ScanConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

/// Scanner configuration options
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ScanConfig {
    /// Force a dialect for every file instead of detecting it
    pub dialect: Option<Dialect>,
    /// Files to scan when none are given on the command line.
    /// Empty means the built-in startup file list.
    pub files: Vec<String>,
    /// Worker threads; 0 picks the available parallelism
    pub jobs: usize,
    /// Scan files in lexicographic path order instead of the given order
    pub sort: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        ScanConfig {
            dialect: None,
            files: Vec::new(),
            jobs: 0,
            sort: false,
        }
    }
}

/// UI configuration options
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct UiConfig {
    pub show_shadowed: bool,
    pub color: bool,
    /// Upper bound for the body column; 0 means fit to the terminal
    pub max_body_width: usize,
}

impl Default for UiConfig {
    fn default() -> Self {
        UiConfig {
            show_shadowed: false,
            color: true,
            max_body_width: 0,
        }
    }
}

impl Config {
    /// Get the lscmd configuration directory path
    pub fn config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| {
                dirs::home_dir()
                    .unwrap_or_else(|| PathBuf::from("~"))
                    .join(".config")
            })
            .join("lscmd")
    }

    /// Get the configuration file path
    pub fn config_path() -> PathBuf {
        Self::config_dir().join("config.toml")
    }

    /// Load configuration from `path`, or return the default if it doesn't exist
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Effective worker count for the scanner
    pub fn jobs(&self) -> usize {
        if self.scan.jobs > 0 {
            return self.scan.jobs;
        }
        std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1)
    }
}
