use std::fs;
use std::path::{Path, PathBuf};

use super::core::VarmapConfig;
use super::retry::RetryConfig;
use crate::errors::VarmapError;

pub const CONFIG_FILE_NAME: &str = ".varmap.toml";

const MAX_TRAVERSAL_DEPTH: usize = 10;

/// Parse and validate config from a TOML string
pub fn parse_and_validate_config(contents: &str) -> Result<VarmapConfig, String> {
    let mut config = toml::from_str::<VarmapConfig>(contents)
        .map_err(|e| format!("Failed to parse {}: {}", CONFIG_FILE_NAME, e))?;

    if config.retry.max_attempts == 0 {
        tracing::warn!("retry.max_attempts must be at least 1. Using default.");
        config.retry.max_attempts = RetryConfig::default().max_attempts;
    }

    Ok(config)
}

/// Load an explicitly requested config file. Unlike discovery, failures are fatal.
pub fn load_config_from(path: &Path) -> Result<VarmapConfig, VarmapError> {
    let contents = fs::read_to_string(path).map_err(|e| {
        VarmapError::Configuration(format!("cannot read {}: {}", path.display(), e))
    })?;
    parse_and_validate_config(&contents).map_err(VarmapError::Configuration)
}

/// Try loading config from a specific path, falling back to `None` on any problem
pub(crate) fn try_load_config_from_path(config_path: &Path) -> Option<VarmapConfig> {
    let contents = match fs::read_to_string(config_path) {
        Ok(contents) => contents,
        Err(e) => {
            handle_read_error(config_path, &e);
            return None;
        }
    };

    match parse_and_validate_config(&contents) {
        Ok(config) => {
            tracing::debug!("Loaded config from {}", config_path.display());
            Some(config)
        }
        Err(e) => {
            tracing::warn!("{}. Using defaults.", e);
            None
        }
    }
}

/// Only log actual errors, not "file not found"
fn handle_read_error(config_path: &Path, error: &std::io::Error) {
    if error.kind() != std::io::ErrorKind::NotFound {
        tracing::warn!(
            "Failed to read config file {}: {}",
            config_path.display(),
            error
        );
    }
}

/// Directory ancestors of `start`, nearest first, up to `max_depth` entries
pub fn directory_ancestors(start: PathBuf, max_depth: usize) -> impl Iterator<Item = PathBuf> {
    std::iter::successors(Some(start), |dir| {
        let mut parent = dir.clone();
        if parent.pop() {
            Some(parent)
        } else {
            None
        }
    })
    .take(max_depth)
}

/// Search `start` and its ancestors for a config file
pub fn load_config_from_dir(start: PathBuf) -> VarmapConfig {
    directory_ancestors(start, MAX_TRAVERSAL_DEPTH)
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find_map(|path| try_load_config_from_path(&path))
        .unwrap_or_else(|| {
            tracing::debug!(
                "No config found after checking {} directories. Using default config.",
                MAX_TRAVERSAL_DEPTH
            );
            VarmapConfig::default()
        })
}

pub fn load_config() -> VarmapConfig {
    match std::env::current_dir() {
        Ok(dir) => load_config_from_dir(dir),
        Err(e) => {
            tracing::warn!(
                "Failed to get current directory: {}. Using default config.",
                e
            );
            VarmapConfig::default()
        }
    }
}
