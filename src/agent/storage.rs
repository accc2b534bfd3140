//! Agent storage: persist and load user-defined agent profiles.

pub mod xdg;

use crate::agent::profile::AgentConfig;
use crate::error::ApiError;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct StoredAgentConfig {
    pub name: String,
    pub config: AgentConfig,
    pub path: PathBuf,
    /// Prompt text from `system_prompt`, or the contents of `system_prompt_path`
    pub resolved_system_prompt: String,
}

pub trait AgentStorage: Send + Sync {
    /// Names of stored profiles, sorted.
    fn names(&self) -> Result<Vec<String>, ApiError>;

    /// Load and validate one profile, resolving its prompt.
    fn load(&self, name: &str) -> Result<StoredAgentConfig, ApiError>;

    /// Load every stored profile in name order. A malformed profile is an error, never skipped.
    fn list(&self) -> Result<Vec<StoredAgentConfig>, ApiError> {
        self.names()?
            .iter()
            .map(|name| self.load(name))
            .collect()
    }

    fn path_for(&self, name: &str) -> Result<PathBuf, ApiError>;
    fn save(&self, name: &str, config: &AgentConfig) -> Result<(), ApiError>;
    fn delete(&self, name: &str) -> Result<(), ApiError>;
    fn agents_dir(&self) -> Result<PathBuf, ApiError>;
}

pub use xdg::XdgAgentStorage;
