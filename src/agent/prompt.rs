//! Prompt file resolution and mtime-aware caching for user-defined agents.

use crate::error::ApiError;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Resolve a prompt file reference.
///
/// Absolute paths are used as-is, `~/` expands to `$HOME`, `./` is relative to the
/// current directory, and anything else is relative to `base_dir`.
pub fn resolve_prompt_path(path: &str, base_dir: &Path) -> Result<PathBuf, ApiError> {
    let candidate = Path::new(path);
    if candidate.is_absolute() {
        return Ok(candidate.to_path_buf());
    }
    if let Some(rest) = path.strip_prefix("~/") {
        let home = std::env::var("HOME")
            .map_err(|_| ApiError::ConfigError("HOME not set".to_string()))?;
        return Ok(PathBuf::from(home).join(rest));
    }
    if let Some(rest) = path.strip_prefix("./") {
        let cwd = std::env::current_dir().map_err(|e| {
            ApiError::ConfigError(format!("Failed to get current directory: {}", e))
        })?;
        return Ok(cwd.join(rest));
    }
    Ok(base_dir.join(path))
}

/// Prompt file contents keyed by path, invalidated when the file's mtime changes.
#[derive(Debug, Default)]
pub struct PromptCache {
    entries: HashMap<PathBuf, (SystemTime, String)>,
}

impl PromptCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a prompt file, serving the cached copy while the mtime is unchanged.
    pub fn load(&mut self, path: &Path) -> Result<String, ApiError> {
        let read_err = |e: std::io::Error| {
            ApiError::ConfigError(format!("Failed to read prompt file {}: {}", path.display(), e))
        };

        let mtime = std::fs::metadata(path)
            .and_then(|meta| meta.modified())
            .map_err(read_err)?;

        if let Some((cached_mtime, content)) = self.entries.get(path) {
            if *cached_mtime == mtime {
                return Ok(content.clone());
            }
        }

        let content = std::fs::read_to_string(path).map_err(read_err)?;
        if content.trim().is_empty() {
            return Err(ApiError::ConfigError(format!(
                "Prompt file {} is empty",
                path.display()
            )));
        }

        self.entries
            .insert(path.to_path_buf(), (mtime, content.clone()));
        Ok(content)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
