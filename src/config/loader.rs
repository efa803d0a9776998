//! Configuration loading and discovery for `dotart.toml`

use super::schema::DotartConfig;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File name searched for in the working directory and its parents
pub const CONFIG_FILE_NAME: &str = "dotart.toml";

/// Configuration loading error
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// File I/O error
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error
    #[error("Failed to parse dotart.toml: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error
    #[error(
        "Config validation failed:\n{}",
        .0.iter().map(|e| format!("  - {}", e)).collect::<Vec<_>>().join("\n")
    )]
    Validation(Vec<String>),
}

/// Find dotart.toml by walking up from the current working directory.
///
/// Search order:
/// 1. Walk up from current directory looking for dotart.toml
/// 2. Check XDG_CONFIG_HOME/dotart/dotart.toml (or ~/.config/dotart/dotart.toml)
pub fn find_config() -> Option<PathBuf> {
    if let Ok(cwd) = env::current_dir() {
        if let Some(path) = find_config_from(cwd) {
            return Some(path);
        }
    }

    find_xdg_config()
}

/// Find dotart.toml in the XDG config directory.
pub fn find_xdg_config() -> Option<PathBuf> {
    let xdg_config = env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|_| env::var("HOME").map(|h| PathBuf::from(h).join(".config")))
        .ok()?;

    let config_path = xdg_config.join("dotart").join(CONFIG_FILE_NAME);
    config_path.exists().then_some(config_path)
}

/// Find dotart.toml by walking up from `start`.
pub fn find_config_from(start: PathBuf) -> Option<PathBuf> {
    let mut current = start;

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }

        if !current.pop() {
            return None;
        }
    }
}

/// Load configuration from a dotart.toml file.
///
/// With an explicit `path` the file must exist. Otherwise the file is
/// discovered with [`find_config`], and an empty configuration is returned
/// when none is found.
pub fn load_config(path: Option<&Path>) -> Result<DotartConfig, ConfigError> {
    let config_path = match path {
        Some(p) => Some(p.to_path_buf()),
        None => find_config(),
    };

    match config_path {
        Some(p) => load_config_file(&p),
        None => Ok(DotartConfig::default()),
    }
}

/// Load and validate one config file.
pub fn load_config_file(path: &Path) -> Result<DotartConfig, ConfigError> {
    let contents = fs::read_to_string(path)?;
    let config: DotartConfig = toml::from_str(&contents)?;

    let errors = config.validate();
    if !errors.is_empty() {
        return Err(ConfigError::Validation(errors.into_iter().map(|e| e.to_string()).collect()));
    }

    tracing::debug!(path = %path.display(), "loaded config");
    Ok(config)
}
