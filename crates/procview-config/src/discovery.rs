//! Config file discovery.
//!
//! Search order (first hit wins):
//! 1. `./procview.toml` (project-local)
//! 2. `<config dir>/config.toml`, where the config dir is `PROCVIEW_CONFIG_DIR`
//!    or the platform default (`~/.config/procview` on Linux)
//!
//! An explicit path skips discovery entirely.

use std::path::{Path, PathBuf};

use crate::{ConfigError, ProcviewConfig, Result};

/// Default config filename for project-local config.
const PROJECT_CONFIG_FILE: &str = "procview.toml";

/// Default config filename within the config directory.
const USER_CONFIG_FILE: &str = "config.toml";

/// Application name for platform directory resolution.
const APP_NAME: &str = "procview";

/// Env var overriding the config directory.
const CONFIG_DIR_ENV: &str = "PROCVIEW_CONFIG_DIR";

/// Result of config discovery and loading.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    /// The parsed configuration.
    pub config: ProcviewConfig,
    /// File the configuration was read from.
    pub source: PathBuf,
    /// Warnings generated during loading (e.g., plaintext secrets).
    pub warnings: Vec<String>,
}

/// Load configuration from `explicit`, or discover it when `None`.
pub fn load_config(explicit: Option<&Path>) -> Result<LoadedConfig> {
    match explicit {
        Some(path) => load_from(path),
        None => load_first(&search_paths()),
    }
}

/// Candidate config files in precedence order.
pub fn search_paths() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from(PROJECT_CONFIG_FILE)];
    if let Some(dir) = config_dir() {
        paths.push(dir.join(USER_CONFIG_FILE));
    }
    paths
}

/// Load the first candidate that exists.
pub fn load_first(candidates: &[PathBuf]) -> Result<LoadedConfig> {
    match candidates.iter().find(|p| p.is_file()) {
        Some(path) => load_from(path),
        None => Err(ConfigError::NotFound {
            searched: candidates
                .iter()
                .map(|p| p.display().to_string())
                .collect::<Vec<_>>()
                .join(", "),
        }),
    }
}

/// Load config from a specific file path (no discovery).
pub fn load_config_file(path: &Path) -> Result<ProcviewConfig> {
    let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
        path: path.display().to_string(),
        source: e,
    })?;
    ProcviewConfig::from_toml(&contents)
}

/// Get the config directory for procview.
///
/// Checks `PROCVIEW_CONFIG_DIR` first, then falls back to the platform default.
pub fn config_dir() -> Option<PathBuf> {
    if let Ok(dir) = std::env::var(CONFIG_DIR_ENV)
        && !dir.is_empty()
    {
        return Some(PathBuf::from(dir));
    }
    dirs::config_dir().map(|d| d.join(APP_NAME))
}

fn load_from(path: &Path) -> Result<LoadedConfig> {
    let config = load_config_file(path)?;

    let mut warnings = Vec::new();
    if config.oauth.has_plaintext_secret() {
        warnings.push(format!(
            "{} stores oauth.client_secret in plaintext; prefer the {} env var",
            path.display(),
            config.oauth.secret_env_var()
        ));
    }

    Ok(LoadedConfig {
        config,
        source: path.to_path_buf(),
        warnings,
    })
}
