//! Path utilities

use std::path::{Path, PathBuf};

use crate::model::{Config, Dialect};

/// Expand tilde (~) in path to home directory
pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix('~') {
        if stripped.is_empty() || stripped.starts_with('/') {
            if let Some(home) = dirs::home_dir() {
                return home.join(stripped.trim_start_matches('/'));
            }
        }
    }
    PathBuf::from(path)
}

/// Files to scan when none are given on the command line.
///
/// `scan.files` from the config wins when set (missing entries are reported
/// by the scan). Otherwise every existing startup file of every supported
/// dialect is used.
pub fn default_files(config: &Config) -> Vec<PathBuf> {
    if !config.scan.files.is_empty() {
        return config.scan.files.iter().map(|f| expand_tilde(f)).collect();
    }

    match dirs::home_dir() {
        Some(home) => existing_startup_files(&home),
        None => Vec::new(),
    }
}

/// Startup files under `home` that exist, in login order:
/// sh, bash, zsh, then the PowerShell profile.
pub fn existing_startup_files(home: &Path) -> Vec<PathBuf> {
    [Dialect::Sh, Dialect::Bash, Dialect::Zsh, Dialect::PowerShell]
        .iter()
        .flat_map(|d| d.startup_files(home))
        .filter(|p| p.is_file())
        .collect()
}
