//! Agent directory: the registration-ordered map from agent name to definition.
//!
//! The directory is built once during startup and then shared read-only
//! (typically behind an `Arc`). Every lookup is an exact name match.

use crate::agent::builtin::builtin_agents;
use crate::agent::capability::CapabilitySet;
use crate::agent::descriptor::{AgentDefinition, AgentDescriptor, PromptBinding};
use crate::agent::profile::ConfiguredAgent;
use crate::agent::storage::AgentStorage;
use crate::agent::validation::validate_descriptor;
use crate::config::{AgentSettings, TiccaConfig};
use crate::error::ApiError;
use serde::Serialize;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// One line of a discovery listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AgentSummary {
    pub name: String,
    pub display_name: String,
    pub description: String,
}

/// Where a registered agent came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AgentSource {
    Builtin,
    Profile(PathBuf),
    Programmatic,
}

/// A registered agent: identity, capabilities, prompt, and external settings.
#[derive(Debug, Clone)]
pub struct RegisteredAgent {
    pub descriptor: AgentDescriptor,
    pub capabilities: CapabilitySet,
    pub prompt: PromptBinding,
    pub settings: AgentSettings,
    pub source: AgentSource,
}

impl RegisteredAgent {
    pub fn name(&self) -> &str {
        &self.descriptor.name
    }

    pub fn is_enabled(&self) -> bool {
        self.settings.enabled
    }

    pub fn summary(&self) -> AgentSummary {
        AgentSummary {
            name: self.descriptor.name.clone(),
            display_name: self.descriptor.display_name.clone(),
            description: self.descriptor.description.clone(),
        }
    }
}

/// Registration-ordered agent directory.
#[derive(Debug, Default)]
pub struct AgentDirectory {
    agents: Vec<Arc<RegisteredAgent>>,
    index: HashMap<String, usize>,
}

impl AgentDirectory {
    /// Create an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the startup directory: built-ins, then stored profiles, then config settings.
    ///
    /// Any registration error aborts the build; a misconfigured agent never vanishes silently.
    pub fn bootstrap(config: &TiccaConfig, storage: &dyn AgentStorage) -> Result<Self, ApiError> {
        let mut directory = Self::new();
        for agent in builtin_agents() {
            directory.register_with_source(agent.as_ref(), AgentSource::Builtin)?;
        }
        directory.load_profiles(storage)?;
        directory.apply_settings(&config.agents);

        if let Some(default_agent) = &config.default_agent {
            directory.get_agent(default_agent).map_err(|_| {
                ApiError::ConfigError(format!(
                    "default_agent '{}' is not a registered agent",
                    default_agent
                ))
            })?;
        }

        info!(agents = directory.len(), "Agent directory ready");
        Ok(directory)
    }

    /// Register an agent.
    ///
    /// Fails with `DuplicateAgent` when the name is taken, leaving the directory unchanged.
    pub fn register(
        &mut self,
        descriptor: AgentDescriptor,
        capabilities: CapabilitySet,
        prompt: PromptBinding,
    ) -> Result<(), ApiError> {
        self.insert(descriptor, capabilities, prompt, AgentSource::Programmatic)
    }

    /// Register a concrete agent implementation.
    pub fn register_definition(&mut self, agent: &dyn AgentDefinition) -> Result<(), ApiError> {
        self.register_with_source(agent, AgentSource::Programmatic)
    }

    fn register_with_source(
        &mut self,
        agent: &dyn AgentDefinition,
        source: AgentSource,
    ) -> Result<(), ApiError> {
        let descriptor = agent.descriptor();
        let capabilities = agent.capabilities().map_err(|e| match e {
            ApiError::ConfigError(msg) => {
                ApiError::ConfigError(format!("Agent '{}': {}", descriptor.name, msg))
            }
            other => other,
        })?;
        let prompt = PromptBinding::new(agent.system_prompt()).map_err(|_| {
            ApiError::ConfigError(format!("Agent '{}' has an empty prompt", descriptor.name))
        })?;
        self.insert(descriptor, capabilities, prompt, source)
    }

    fn insert(
        &mut self,
        descriptor: AgentDescriptor,
        capabilities: CapabilitySet,
        prompt: PromptBinding,
        source: AgentSource,
    ) -> Result<(), ApiError> {
        validate_descriptor(&descriptor)?;
        if capabilities.is_empty() {
            return Err(ApiError::ConfigError(format!(
                "Agent '{}' has an empty capability list",
                descriptor.name
            )));
        }
        if self.index.contains_key(&descriptor.name) {
            return Err(ApiError::DuplicateAgent(descriptor.name));
        }

        debug!(
            agent = %descriptor.name,
            tools = capabilities.len(),
            source = ?source,
            "Registered agent"
        );
        self.index.insert(descriptor.name.clone(), self.agents.len());
        self.agents.push(Arc::new(RegisteredAgent {
            descriptor,
            capabilities,
            prompt,
            settings: AgentSettings::default(),
            source,
        }));
        Ok(())
    }

    /// Register every stored user profile, in storage order.
    pub fn load_profiles(&mut self, storage: &dyn AgentStorage) -> Result<(), ApiError> {
        for stored in storage.list()? {
            let agent = ConfiguredAgent {
                config: stored.config,
                prompt: stored.resolved_system_prompt,
            };
            self.register_with_source(&agent, AgentSource::Profile(stored.path))?;
        }
        Ok(())
    }

    /// Attach externally supplied enablement/model settings.
    ///
    /// Settings naming an unregistered agent are ignored with a warning.
    pub fn apply_settings(&mut self, settings: &HashMap<String, AgentSettings>) {
        let mut names: Vec<&String> = settings.keys().collect();
        names.sort();
        for name in names {
            match self.index.get(name.as_str()) {
                Some(&position) => {
                    Arc::make_mut(&mut self.agents[position]).settings = settings[name].clone();
                }
                None => warn!(agent = %name, "Settings provided for unknown agent"),
            }
        }
    }

    /// All agents in registration order.
    pub fn list_agents(&self) -> Vec<AgentSummary> {
        self.agents.iter().map(|agent| agent.summary()).collect()
    }

    /// Exact-match lookup.
    pub fn get_agent(&self, name: &str) -> Result<Arc<RegisteredAgent>, ApiError> {
        self.index
            .get(name)
            .map(|&position| Arc::clone(&self.agents[position]))
            .ok_or_else(|| ApiError::AgentNotFound(name.to_string()))
    }

    /// The capability registry of an agent, in declaration order.
    pub fn get_tools_for(&self, name: &str) -> Result<CapabilitySet, ApiError> {
        Ok(self.get_agent(name)?.capabilities.clone())
    }

    pub fn is_enabled(&self, name: &str) -> Result<bool, ApiError> {
        Ok(self.get_agent(name)?.is_enabled())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<RegisteredAgent>> {
        self.agents.iter()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }
}
