//! User-defined agent profiles loaded from TOML.

use crate::agent::capability::CapabilitySet;
use crate::agent::descriptor::{AgentDefinition, AgentDescriptor};
use crate::agent::validation::validate_agent_name;
use crate::error::ApiError;
use serde::{Deserialize, Serialize};

/// On-disk shape of a user-defined agent (`agents/<name>.toml`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Agent name; must match the file stem
    pub name: String,

    pub display_name: String,

    #[serde(default)]
    pub description: String,

    /// Tool identifiers granted to this agent
    pub tools: Vec<String>,

    /// Inline system prompt
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_prompt: Option<String>,

    /// Prompt file path (absolute, `~/`, `./`, or relative to the ticca config dir)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_prompt_path: Option<String>,
}

impl AgentConfig {
    /// Validate the profile shape before prompt resolution.
    pub fn validate(&self) -> Result<(), ApiError> {
        validate_agent_name(&self.name)?;

        if self.tools.is_empty() {
            return Err(ApiError::ConfigError(format!(
                "Agent '{}' must declare at least one tool",
                self.name
            )));
        }

        match (&self.system_prompt, &self.system_prompt_path) {
            (Some(prompt), _) if prompt.trim().is_empty() => Err(ApiError::ConfigError(
                format!("Agent '{}': system_prompt cannot be empty if provided", self.name),
            )),
            (_, Some(path)) if path.trim().is_empty() => Err(ApiError::ConfigError(format!(
                "Agent '{}': system_prompt_path cannot be empty if provided",
                self.name
            ))),
            (None, None) => Err(ApiError::ConfigError(format!(
                "Agent '{}' requires either system_prompt or system_prompt_path",
                self.name
            ))),
            _ => Ok(()),
        }
    }
}

/// A profile whose prompt has been resolved, ready for registration.
#[derive(Debug, Clone)]
pub struct ConfiguredAgent {
    pub config: AgentConfig,
    pub prompt: String,
}

impl AgentDefinition for ConfiguredAgent {
    fn descriptor(&self) -> AgentDescriptor {
        AgentDescriptor::new(
            self.config.name.clone(),
            self.config.display_name.clone(),
            self.config.description.clone(),
        )
    }

    fn capabilities(&self) -> Result<CapabilitySet, ApiError> {
        CapabilitySet::parse(&self.config.tools)
    }

    fn system_prompt(&self) -> String {
        self.prompt.clone()
    }
}
