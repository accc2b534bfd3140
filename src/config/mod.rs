//! Configuration: layered TOML files plus `TICCA__*` environment overrides.
//!
//! Precedence (lowest to highest): built-in defaults, global file
//! (`$XDG_CONFIG_HOME/ticca/config.toml`), workspace `ticca.toml`, workspace
//! `ticca.<TICCA_ENV>.toml`, environment.

mod facade;
mod merge;
mod paths;
mod session;
mod sources;

pub use facade::ConfigLoader;
pub use paths::xdg;
pub use session::{CompactionStrategy, SessionBackend, SessionConfig};

use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Root configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TiccaConfig {
    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub delegation: DelegationConfig,

    #[serde(default)]
    pub session: SessionConfig,

    /// Agent selected when a front end does not name one
    #[serde(default)]
    pub default_agent: Option<String>,

    /// Per-agent settings keyed by agent name
    #[serde(default)]
    pub agents: HashMap<String, AgentSettings>,
}

/// Externally supplied per-agent flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentSettings {
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Model the LLM runtime should use for this agent
    #[serde(default)]
    pub model: Option<String>,
}

impl Default for AgentSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            model: None,
        }
    }
}

/// Bounds applied by the host to nested agent invocations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DelegationConfig {
    /// Maximum nesting of invoke_agent calls below a top-level session
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,

    /// Per-invocation time limit in seconds; 0 disables the limit
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl DelegationConfig {
    pub fn timeout(&self) -> Option<std::time::Duration> {
        (self.timeout_secs > 0).then(|| std::time::Duration::from_secs(self.timeout_secs))
    }
}

impl Default for DelegationConfig {
    fn default() -> Self {
        Self {
            max_depth: default_max_depth(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_max_depth() -> usize {
    4
}

fn default_timeout_secs() -> u64 {
    300
}
