//! ConfigLoader facade delegating to the merge service.

use super::merge::service::MergeService;
use super::TiccaConfig;
use crate::error::ApiError;
use std::path::Path;

pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration for a workspace from files and environment.
    pub fn load(workspace_root: &Path) -> Result<TiccaConfig, ApiError> {
        Ok(MergeService::load(workspace_root)?)
    }

    /// Load configuration from a specific file plus environment.
    pub fn load_from_file(path: &Path) -> Result<TiccaConfig, ApiError> {
        Ok(MergeService::load_from_file(path)?)
    }

    /// `--config` wins over workspace discovery when given.
    pub fn resolve(workspace_root: &Path, config_path: Option<&Path>) -> Result<TiccaConfig, ApiError> {
        match config_path {
            Some(path) => Self::load_from_file(path),
            None => Self::load(workspace_root),
        }
    }
}
