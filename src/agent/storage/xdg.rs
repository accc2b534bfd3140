use crate::agent::profile::AgentConfig;
use crate::agent::prompt::{resolve_prompt_path, PromptCache};
use crate::agent::storage::{AgentStorage, StoredAgentConfig};
use crate::config::xdg;
use crate::error::ApiError;
use parking_lot::Mutex;
use std::path::{Path, PathBuf};

/// Agent profiles stored as `<config root>/agents/<name>.toml`.
///
/// The config root defaults to `$XDG_CONFIG_HOME/ticca`.
pub struct XdgAgentStorage {
    root: Option<PathBuf>,
    prompts: Mutex<PromptCache>,
}

impl XdgAgentStorage {
    pub fn new() -> Self {
        Self {
            root: None,
            prompts: Mutex::new(PromptCache::new()),
        }
    }

    /// Use an explicit config root instead of the XDG location.
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: Some(root.into()),
            prompts: Mutex::new(PromptCache::new()),
        }
    }

    fn config_root(&self) -> Result<PathBuf, ApiError> {
        match &self.root {
            Some(root) => Ok(root.clone()),
            None => xdg::ticca_config_dir(),
        }
    }

    fn load_profile(&self, path: &Path, base_dir: &Path) -> Result<StoredAgentConfig, ApiError> {
        let file_stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .ok_or_else(|| {
                ApiError::ConfigError(format!("Invalid agent filename: {}", path.display()))
            })?
            .to_string();

        let content = std::fs::read_to_string(path).map_err(|e| {
            ApiError::ConfigError(format!("Failed to read agent config {}: {}", path.display(), e))
        })?;
        let config: AgentConfig = toml::from_str(&content).map_err(|e| {
            ApiError::ConfigError(format!("Failed to parse agent config {}: {}", path.display(), e))
        })?;

        if config.name != file_stem {
            return Err(ApiError::ConfigError(format!(
                "Agent name '{}' doesn't match filename '{}.toml'",
                config.name, file_stem
            )));
        }
        config.validate()?;

        let resolved_system_prompt = match (&config.system_prompt, &config.system_prompt_path) {
            (Some(inline), _) => inline.clone(),
            (None, Some(prompt_path)) => {
                let resolved = resolve_prompt_path(prompt_path, base_dir)?;
                self.prompts.lock().load(&resolved)?
            }
            (None, None) => {
                return Err(ApiError::ConfigError(format!(
                    "Agent '{}' has no system prompt",
                    config.name
                )))
            }
        };

        Ok(StoredAgentConfig {
            name: file_stem,
            config,
            path: path.to_path_buf(),
            resolved_system_prompt,
        })
    }
}

impl Default for XdgAgentStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl AgentStorage for XdgAgentStorage {
    fn names(&self) -> Result<Vec<String>, ApiError> {
        let agents_dir = self.agents_dir()?;
        if !agents_dir.exists() {
            return Ok(Vec::new());
        }

        let entries = std::fs::read_dir(&agents_dir).map_err(|e| {
            ApiError::ConfigError(format!(
                "Failed to read agents directory {}: {}",
                agents_dir.display(),
                e
            ))
        })?;

        let mut names = Vec::new();
        for entry in entries {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    tracing::warn!(
                        "Failed to read directory entry in {}: {}",
                        agents_dir.display(),
                        e
                    );
                    continue;
                }
            };
            let path = entry.path();
            if path.extension() != Some(std::ffi::OsStr::new("toml")) {
                continue;
            }
            match path.file_stem().and_then(|s| s.to_str()) {
                Some(stem) => names.push(stem.to_string()),
                None => {
                    return Err(ApiError::ConfigError(format!(
                        "Invalid agent filename: {}",
                        path.display()
                    )))
                }
            }
        }
        // read_dir order is platform dependent; registration order must not be.
        names.sort();
        Ok(names)
    }

    fn load(&self, name: &str) -> Result<StoredAgentConfig, ApiError> {
        let base_dir = self.config_root()?;
        let path = self.path_for(name)?;
        let stored = self.load_profile(&path, &base_dir)?;
        tracing::debug!(agent = %stored.name, path = %path.display(), "Loaded agent profile");
        Ok(stored)
    }

    fn path_for(&self, name: &str) -> Result<PathBuf, ApiError> {
        Ok(self.agents_dir()?.join(format!("{}.toml", name)))
    }

    fn save(&self, name: &str, config: &AgentConfig) -> Result<(), ApiError> {
        if config.name != name {
            return Err(ApiError::ConfigError(format!(
                "Agent name mismatch: config has '{}' but expected '{}'",
                config.name, name
            )));
        }
        config.validate()?;

        let agents_dir = self.agents_dir()?;
        std::fs::create_dir_all(&agents_dir).map_err(|e| {
            ApiError::ConfigError(format!(
                "Failed to create agents directory {}: {}",
                agents_dir.display(),
                e
            ))
        })?;

        let config_path = self.path_for(name)?;
        let toml_content = toml::to_string_pretty(config).map_err(|e| {
            ApiError::ConfigError(format!("Failed to serialize agent config: {}", e))
        })?;
        std::fs::write(&config_path, toml_content).map_err(|e| {
            ApiError::ConfigError(format!(
                "Failed to write agent config to {}: {}",
                config_path.display(),
                e
            ))
        })
    }

    fn delete(&self, name: &str) -> Result<(), ApiError> {
        let config_path = self.path_for(name)?;
        if !config_path.exists() {
            return Err(ApiError::ConfigError(format!(
                "Agent config file not found: {}",
                config_path.display()
            )));
        }
        std::fs::remove_file(&config_path).map_err(|e| {
            ApiError::ConfigError(format!(
                "Failed to delete agent config file {}: {}",
                config_path.display(),
                e
            ))
        })
    }

    fn agents_dir(&self) -> Result<PathBuf, ApiError> {
        Ok(self.config_root()?.join("agents"))
    }
}
