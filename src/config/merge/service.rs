//! MergeService: orchestrates sources, applies merge policy, deserializes to TiccaConfig.

use crate::config::sources::{environment, global_file, workspace_file};
use crate::config::TiccaConfig;
use config::{ConfigError, File, FileFormat};
use std::path::Path;

use super::merge_policy;

pub struct MergeService;

impl MergeService {
    /// Load config from the standard sources.
    /// Precedence: global file (lowest) -> workspace file -> workspace env file -> environment (highest).
    pub fn load(workspace_root: &Path) -> Result<TiccaConfig, ConfigError> {
        let builder = merge_policy::builder_with_defaults()?;
        let builder = global_file::add_to_builder(builder)?;
        let builder = workspace_file::add_to_builder(builder, workspace_root)?;
        let builder = environment::add_to_builder(builder)?;

        builder.build()?.try_deserialize()
    }

    /// Load config from one explicit file with the environment overlay.
    pub fn load_from_file(path: &Path) -> Result<TiccaConfig, ConfigError> {
        let builder = merge_policy::builder_with_defaults()?
            .add_source(File::from(path).format(FileFormat::Toml).required(true));
        let builder = environment::add_to_builder(builder)?;

        builder.build()?.try_deserialize()
    }
}
