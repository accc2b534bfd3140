//! Session persistence settings.

use crate::config::xdg;
use crate::error::ApiError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Which session storage implementation to use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionBackend {
    /// Nothing is persisted; loads return empty
    #[default]
    None,
    /// Process-local, lost on exit
    Memory,
    /// sled database on disk
    Sled,
}

/// How long conversations are shortened before they exceed the model context.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompactionStrategy {
    #[default]
    Truncation,
    Summarization,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    #[serde(default)]
    pub backend: SessionBackend,

    /// Database path for the sled backend; relative paths are taken from the workspace root.
    /// Unset means `$XDG_DATA_HOME/ticca/<workspace path>/sessions`.
    #[serde(default)]
    pub path: Option<PathBuf>,

    #[serde(default)]
    pub compaction_strategy: CompactionStrategy,
}

impl SessionConfig {
    /// Resolve the on-disk session database location.
    pub fn resolve_path(&self, workspace_root: &Path) -> Result<PathBuf, ApiError> {
        match &self.path {
            Some(path) if path.is_absolute() => Ok(path.clone()),
            Some(path) => Ok(workspace_root.join(path)),
            None => Ok(xdg::workspace_data_dir(workspace_root)?.join("sessions")),
        }
    }
}
