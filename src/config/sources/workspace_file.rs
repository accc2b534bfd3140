//! Workspace config files: `ticca.toml` and `ticca.<TICCA_ENV>.toml` (both optional).

use config::builder::DefaultState;
use config::{ConfigBuilder, ConfigError, File, FileFormat};
use std::path::Path;

pub const WORKSPACE_CONFIG_FILE: &str = "ticca.toml";

pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
    workspace_root: &Path,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let mut builder = builder.add_source(
        File::from(workspace_root.join(WORKSPACE_CONFIG_FILE))
            .format(FileFormat::Toml)
            .required(false),
    );

    if let Ok(env) = std::env::var("TICCA_ENV") {
        if !env.is_empty() {
            builder = builder.add_source(
                File::from(workspace_root.join(format!("ticca.{}.toml", env)))
                    .format(FileFormat::Toml)
                    .required(false),
            );
        }
    }

    Ok(builder)
}
