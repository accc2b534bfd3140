//! Defaults every merged configuration starts from.

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError};

pub fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Config::builder()
        .set_default("delegation.max_depth", 4)?
        .set_default("delegation.timeout_secs", 300)?
        .set_default("session.backend", "none")?
        .set_default("session.compaction_strategy", "truncation")
}
