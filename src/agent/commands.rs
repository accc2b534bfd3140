//! Agent command service: single entry point per agent CLI command variant.
//!
//! Owns all agent workflow logic; the CLI parses, calls one method per variant, and formats output.

use crate::agent::builtin::builtin_agents;
use crate::agent::capability::BASELINE_TOOLS;
use crate::agent::descriptor::AgentDefinition;
use crate::agent::directory::{AgentDirectory, AgentSource};
use crate::agent::profile::{AgentConfig, ConfiguredAgent};
use crate::agent::storage::AgentStorage;
use crate::agent::validation::validate_descriptor;
use crate::error::ApiError;
use crate::tools::ToolDispatcher;
use serde::Serialize;
use std::path::PathBuf;

pub struct AgentCommandService;

#[derive(Debug, Clone, Serialize)]
pub struct AgentListItem {
    pub name: String,
    pub display_name: String,
    pub description: String,
    pub source: String,
    pub enabled: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct AgentListResult {
    pub agents: Vec<AgentListItem>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AgentShowResult {
    pub name: String,
    pub display_name: String,
    pub description: String,
    pub source: String,
    pub enabled: bool,
    pub model: Option<String>,
    pub tools: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AgentToolsResult {
    pub name: String,
    pub tools: Vec<String>,
}

/// Outcome of validating one agent.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationResult {
    pub name: String,
    pub checks: Vec<(String, bool)>,
    pub errors: Vec<String>,
}

impl ValidationResult {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            checks: Vec::new(),
            errors: Vec::new(),
        }
    }

    pub fn add_check(&mut self, description: &str, passed: bool) {
        self.checks.push((description.to_string(), passed));
    }

    pub fn add_error(&mut self, error: impl Into<String>) {
        self.errors.push(error.into());
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty() && self.checks.iter().all(|(_, passed)| *passed)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AgentStatusEntry {
    pub name: String,
    pub source: String,
    pub enabled: bool,
    pub model: Option<String>,
    pub tool_count: usize,
    /// Granted tools this binary has no handler for
    pub unhandled_tools: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AgentCreateResult {
    pub name: String,
    pub config_path: PathBuf,
}

#[derive(Debug, Clone, Serialize)]
pub struct AgentRemoveResult {
    pub name: String,
    pub config_path: PathBuf,
}

/// Fields for `agent create`.
#[derive(Debug, Clone, Default)]
pub struct AgentCreateRequest {
    pub name: String,
    pub display_name: String,
    pub description: String,
    pub tools: Vec<String>,
    pub system_prompt: Option<String>,
    pub system_prompt_path: Option<String>,
}

pub fn source_label(source: &AgentSource) -> String {
    match source {
        AgentSource::Builtin => "builtin".to_string(),
        AgentSource::Profile(path) => format!("profile ({})", path.display()),
        AgentSource::Programmatic => "programmatic".to_string(),
    }
}

impl AgentCommandService {
    /// List agents in registration order, optionally only enabled ones.
    pub fn list(directory: &AgentDirectory, enabled_only: bool) -> AgentListResult {
        let agents = directory
            .iter()
            .filter(|agent| !enabled_only || agent.is_enabled())
            .map(|agent| AgentListItem {
                name: agent.descriptor.name.clone(),
                display_name: agent.descriptor.display_name.clone(),
                description: agent.descriptor.description.clone(),
                source: source_label(&agent.source),
                enabled: agent.is_enabled(),
            })
            .collect();
        AgentListResult { agents }
    }

    /// Show one agent; include_prompt controls whether prompt text is returned.
    pub fn show(
        directory: &AgentDirectory,
        name: &str,
        include_prompt: bool,
    ) -> Result<AgentShowResult, ApiError> {
        let agent = directory.get_agent(name)?;
        Ok(AgentShowResult {
            name: agent.descriptor.name.clone(),
            display_name: agent.descriptor.display_name.clone(),
            description: agent.descriptor.description.clone(),
            source: source_label(&agent.source),
            enabled: agent.is_enabled(),
            model: agent.settings.model.clone(),
            tools: agent.capabilities.names().into_iter().map(str::to_string).collect(),
            prompt: include_prompt.then(|| agent.prompt.as_str().to_string()),
        })
    }

    pub fn tools(directory: &AgentDirectory, name: &str) -> Result<AgentToolsResult, ApiError> {
        let capabilities = directory.get_tools_for(name)?;
        Ok(AgentToolsResult {
            name: name.to_string(),
            tools: capabilities.names().into_iter().map(str::to_string).collect(),
        })
    }

    /// Validate one agent, built-in or stored profile.
    pub fn validate_single(storage: &dyn AgentStorage, name: &str) -> Result<ValidationResult, ApiError> {
        if let Some(builtin) = builtin_agents()
            .into_iter()
            .find(|agent| agent.descriptor().name == name)
        {
            return Ok(Self::validate_definition(builtin.as_ref()));
        }

        if !storage.names()?.iter().any(|stored| stored == name) {
            return Err(ApiError::AgentNotFound(name.to_string()));
        }
        Ok(Self::validate_profile(storage, name))
    }

    /// Validate every built-in and stored agent, reporting each failure separately.
    pub fn validate_all(storage: &dyn AgentStorage) -> Result<Vec<ValidationResult>, ApiError> {
        let builtins = builtin_agents();
        let mut results: Vec<ValidationResult> = builtins
            .iter()
            .map(|agent| Self::validate_definition(agent.as_ref()))
            .collect();

        for name in storage.names()? {
            let mut result = Self::validate_profile(storage, &name);
            let shadows_builtin = builtins
                .iter()
                .any(|agent| agent.descriptor().name == name);
            result.add_check("Name not taken by a built-in agent", !shadows_builtin);
            results.push(result);
        }
        Ok(results)
    }

    fn validate_profile(storage: &dyn AgentStorage, name: &str) -> ValidationResult {
        match storage.load(name) {
            Ok(stored) => {
                let agent = ConfiguredAgent {
                    config: stored.config,
                    prompt: stored.resolved_system_prompt,
                };
                let mut result = Self::validate_definition(&agent);
                result.add_check("Profile loads", true);
                result
            }
            Err(e) => {
                let mut result = ValidationResult::new(name);
                result.add_check("Profile loads", false);
                result.add_error(e.to_string());
                result
            }
        }
    }

    fn validate_definition(agent: &dyn AgentDefinition) -> ValidationResult {
        let descriptor = agent.descriptor();
        let mut result = ValidationResult::new(descriptor.name.clone());

        match validate_descriptor(&descriptor) {
            Ok(()) => result.add_check("Descriptor is well-formed", true),
            Err(e) => {
                result.add_check("Descriptor is well-formed", false);
                result.add_error(e.to_string());
            }
        }

        match agent.capabilities() {
            Ok(capabilities) => {
                let baseline = BASELINE_TOOLS.iter().all(|tool| capabilities.contains(*tool));
                result.add_check("Capability list is valid", true);
                result.add_check("Baseline tools present", baseline);
            }
            Err(e) => {
                result.add_check("Capability list is valid", false);
                result.add_error(e.to_string());
            }
        }

        result.add_check("Prompt is non-empty", !agent.system_prompt().trim().is_empty());
        result
    }

    /// One status row per registered agent.
    pub fn status(directory: &AgentDirectory, dispatcher: &ToolDispatcher) -> Vec<AgentStatusEntry> {
        directory
            .iter()
            .map(|agent| AgentStatusEntry {
                name: agent.descriptor.name.clone(),
                source: source_label(&agent.source),
                enabled: agent.is_enabled(),
                model: agent.settings.model.clone(),
                tool_count: agent.capabilities.len(),
                unhandled_tools: agent
                    .capabilities
                    .iter()
                    .filter(|tool| !BASELINE_TOOLS.contains(tool))
                    .filter(|tool| !dispatcher.has_handler(**tool))
                    .map(|tool| tool.to_string())
                    .collect(),
            })
            .collect()
    }

    /// Create a profile. The agent becomes available on the next start.
    pub fn create(
        storage: &dyn AgentStorage,
        directory: &AgentDirectory,
        request: AgentCreateRequest,
    ) -> Result<AgentCreateResult, ApiError> {
        if directory.contains(&request.name) {
            return Err(ApiError::DuplicateAgent(request.name));
        }

        let config = AgentConfig {
            name: request.name.clone(),
            display_name: request.display_name,
            description: request.description,
            tools: request.tools,
            system_prompt: request.system_prompt,
            system_prompt_path: request.system_prompt_path,
        };
        config.validate()?;
        ConfiguredAgent {
            config: config.clone(),
            prompt: String::new(),
        }
        .capabilities()?;

        storage.save(&request.name, &config)?;
        // Catches prompt paths that do not resolve.
        storage.load(&request.name).map_err(|e| {
            if let Err(cleanup) = storage.delete(&request.name) {
                tracing::warn!(agent = %request.name, error = %cleanup, "Failed to roll back agent profile");
            }
            e
        })?;

        Ok(AgentCreateResult {
            config_path: storage.path_for(&request.name)?,
            name: request.name,
        })
    }

    /// Delete a stored profile. Built-in agents cannot be removed.
    ///
    /// Works from stored names alone, so a profile that no longer loads can still be deleted.
    pub fn remove(storage: &dyn AgentStorage, name: &str) -> Result<AgentRemoveResult, ApiError> {
        if builtin_agents()
            .iter()
            .any(|agent| agent.descriptor().name == name)
        {
            return Err(ApiError::ConfigError(format!(
                "Agent '{}' is built in and cannot be removed",
                name
            )));
        }
        if !storage.names()?.iter().any(|stored| stored == name) {
            return Err(ApiError::AgentNotFound(name.to_string()));
        }
        let config_path = storage.path_for(name)?;
        storage.delete(name)?;
        Ok(AgentRemoveResult {
            name: name.to_string(),
            config_path,
        })
    }
}
