//! Agent identity and the trait concrete agents implement.

use crate::agent::capability::CapabilitySet;
use crate::error::ApiError;
use serde::{Deserialize, Serialize};

/// Immutable identity of one agent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentDescriptor {
    /// Directory key: lowercase, hyphen separated
    pub name: String,
    /// Human-readable label
    pub display_name: String,
    /// One-line capability summary shown in discovery listings
    pub description: String,
}

impl AgentDescriptor {
    pub fn new(
        name: impl Into<String>,
        display_name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            display_name: display_name.into(),
            description: description.into(),
        }
    }
}

/// Opaque instruction text consumed by the LLM runtime while acting as one agent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PromptBinding(String);

impl PromptBinding {
    pub fn new(text: impl Into<String>) -> Result<Self, ApiError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(ApiError::ConfigError(
                "Prompt binding cannot be empty".to_string(),
            ));
        }
        Ok(Self(text))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for PromptBinding {
    type Error = ApiError;

    fn try_from(text: String) -> Result<Self, Self::Error> {
        Self::new(text)
    }
}

impl From<PromptBinding> for String {
    fn from(prompt: PromptBinding) -> Self {
        prompt.0
    }
}

/// A concrete agent implementation: one descriptor, one capability set, one prompt.
pub trait AgentDefinition: Send + Sync {
    fn descriptor(&self) -> AgentDescriptor;

    fn capabilities(&self) -> Result<CapabilitySet, ApiError>;

    fn system_prompt(&self) -> String;
}
