//! XDG Base Directory helpers.

use crate::error::ApiError;
use std::path::{Component, Path, PathBuf};

/// `$XDG_DATA_HOME`, falling back to `$HOME/.local/share`.
pub fn data_home() -> Option<PathBuf> {
    if let Ok(xdg_data_home) = std::env::var("XDG_DATA_HOME") {
        if !xdg_data_home.is_empty() {
            return Some(PathBuf::from(xdg_data_home));
        }
    }

    std::env::var("HOME")
        .ok()
        .map(|home| PathBuf::from(home).join(".local").join("share"))
}

/// `$XDG_CONFIG_HOME`, falling back to `$HOME/.config`.
pub fn config_home() -> Result<PathBuf, ApiError> {
    if let Ok(xdg_config_home) = std::env::var("XDG_CONFIG_HOME") {
        if !xdg_config_home.is_empty() {
            return Ok(PathBuf::from(xdg_config_home));
        }
    }

    let home = std::env::var("HOME").map_err(|_| {
        ApiError::ConfigError(
            "Could not determine XDG config home directory (HOME not set)".to_string(),
        )
    })?;

    Ok(PathBuf::from(home).join(".config"))
}

/// `$XDG_CONFIG_HOME/ticca`
pub fn ticca_config_dir() -> Result<PathBuf, ApiError> {
    Ok(config_home()?.join("ticca"))
}

/// `$XDG_CONFIG_HOME/ticca/config.toml`
pub fn global_config_file() -> Result<PathBuf, ApiError> {
    Ok(ticca_config_dir()?.join("config.toml"))
}

/// Data directory for one workspace: `$XDG_DATA_HOME/ticca/<canonical workspace path>/`.
///
/// `/home/user/project` maps to `$XDG_DATA_HOME/ticca/home/user/project/`.
pub fn workspace_data_dir(workspace_root: &Path) -> Result<PathBuf, ApiError> {
    let data_home = data_home().ok_or_else(|| {
        ApiError::ConfigError(
            "Could not determine XDG data home directory (HOME not set)".to_string(),
        )
    })?;

    let canonical = workspace_root.canonicalize().map_err(|e| {
        ApiError::ConfigError(format!("Failed to canonicalize workspace path: {}", e))
    })?;

    let mut data_dir = data_home.join("ticca");
    for component in canonical.components() {
        if let Component::Normal(name) = component {
            data_dir.push(name);
        }
    }
    Ok(data_dir)
}
