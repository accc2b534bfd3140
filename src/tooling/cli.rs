//! CLI Tooling
//!
//! Command-line interface for inspecting agents, stored sessions, and the
//! resolved configuration of a workspace.

use crate::agent::commands::{AgentCommandService, AgentCreateRequest};
use crate::agent::{AgentDirectory, ToolId, XdgAgentStorage};
use crate::config::{ConfigLoader, TiccaConfig};
use crate::error::ApiError;
use crate::logging::{LoggingConfig, LoggingOverrides};
use crate::session::{open_storage, SessionQuery, SessionStorage};
use crate::tooling::format::{
    format_agent_list_json, format_agent_list_text, format_agent_show_text,
    format_agent_status_text, format_agent_tools_text, format_session_list_text,
    format_session_messages_text, format_validation_result, format_validation_results_all,
    to_json,
};
use crate::tools::ToolDispatcher;
use clap::{Parser, Subcommand};
use serde_json::json;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

/// Ticca CLI - agent directory and session inspection
#[derive(Parser)]
#[command(name = "ticca")]
#[command(about = "Agentic terminal assistant: inspect agents, sessions, and configuration")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Workspace root directory
    #[arg(long, default_value = ".")]
    pub workspace: PathBuf,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging (default: off)
    #[arg(long, default_value = "false")]
    pub verbose: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file, file+stderr, both)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output includes "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    pub fn logging_overrides(&self) -> LoggingOverrides {
        LoggingOverrides {
            verbose: self.verbose,
            level: self.log_level.clone(),
            format: self.log_format.clone(),
            output: self.log_output.clone(),
            file: self.log_file.clone(),
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Manage agents
    Agent {
        #[command(subcommand)]
        command: AgentCommands,
    },
    /// Inspect stored sessions
    Session {
        #[command(subcommand)]
        command: SessionCommands,
    },
    /// Inspect configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
pub enum AgentCommands {
    /// Show agent status (enablement, model, unhandled tools)
    Status {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// List all agents in registration order
    List {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
        /// Only agents enabled by configuration
        #[arg(long)]
        enabled: bool,
    },
    /// Show agent details
    Show {
        /// Agent name
        name: String,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
        /// Include prompt text in output
        #[arg(long)]
        include_prompt: bool,
    },
    /// List the tools an agent may call
    Tools {
        /// Agent name
        name: String,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Validate agent definitions
    Validate {
        /// Agent name (required unless --all is used)
        #[arg(required_unless_present = "all")]
        name: Option<String>,
        /// Validate all agents
        #[arg(long, conflicts_with = "name")]
        all: bool,
        /// Show detailed validation results
        #[arg(long)]
        verbose: bool,
    },
    /// Create a user-defined agent profile
    Create {
        /// Agent name (lowercase, hyphenated)
        name: String,
        /// Human-readable name
        #[arg(long)]
        display_name: Option<String>,
        /// One-line description
        #[arg(long)]
        description: Option<String>,
        /// Tool identifiers, comma separated
        #[arg(long, value_delimiter = ',')]
        tools: Vec<String>,
        /// Inline system prompt
        #[arg(long, conflicts_with = "prompt_path")]
        prompt: Option<String>,
        /// Path to a prompt file
        #[arg(long)]
        prompt_path: Option<String>,
        /// Use interactive mode (default when --display-name is missing)
        #[arg(long)]
        interactive: bool,
        /// Use non-interactive mode (use flags)
        #[arg(long, conflicts_with = "interactive")]
        non_interactive: bool,
    },
    /// Remove a user-defined agent profile
    Remove {
        /// Agent name
        name: String,
        /// Skip confirmation prompt
        #[arg(long)]
        force: bool,
    },
}

#[derive(Subcommand)]
pub enum SessionCommands {
    /// List stored sessions, most recent first
    List {
        /// Only sessions of this agent
        #[arg(long)]
        agent: Option<String>,
        /// Only auto-saved sessions
        #[arg(long)]
        auto_saved: bool,
        /// Maximum number of sessions
        #[arg(long, default_value = "100")]
        limit: usize,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Show the messages of a stored session
    Show {
        /// Session id
        session_id: String,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print the merged configuration
    Show {
        /// Output format (toml or json)
        #[arg(long, default_value = "toml")]
        format: String,
    },
}

/// CLI context for one workspace
pub struct CliContext {
    workspace_root: PathBuf,
    config: TiccaConfig,
    agents: XdgAgentStorage,
    sessions: Arc<dyn SessionStorage>,
    dispatcher: ToolDispatcher,
}

impl CliContext {
    /// Create a new CLI context
    pub fn new(workspace_root: PathBuf, config_path: Option<PathBuf>) -> Result<Self, ApiError> {
        let config = ConfigLoader::resolve(&workspace_root, config_path.as_deref())?;
        let sessions = open_storage(&config.session, &workspace_root)?;
        Ok(Self {
            workspace_root,
            config,
            agents: XdgAgentStorage::new(),
            sessions,
            dispatcher: ToolDispatcher::with_defaults(),
        })
    }

    pub fn config(&self) -> &TiccaConfig {
        &self.config
    }

    /// Logging configuration with command-line flags applied.
    pub fn logging_config(&self, overrides: &LoggingOverrides) -> LoggingConfig {
        self.config.logging.clone().with_overrides(overrides)
    }

    pub fn session_storage(&self) -> Arc<dyn SessionStorage> {
        Arc::clone(&self.sessions)
    }

    /// Build the agent directory for this invocation.
    pub fn directory(&self) -> Result<AgentDirectory, ApiError> {
        AgentDirectory::bootstrap(&self.config, &self.agents)
    }

    /// Execute a CLI command
    pub fn execute(&self, command: &Commands) -> Result<String, ApiError> {
        info!(workspace = %self.workspace_root.display(), "Executing command");
        match command {
            Commands::Agent { command } => self.handle_agent_command(command),
            Commands::Session { command } => self.handle_session_command(command),
            Commands::Config { command } => self.handle_config_command(command),
        }
    }

    /// Handle agent management commands
    fn handle_agent_command(&self, command: &AgentCommands) -> Result<String, ApiError> {
        match command {
            AgentCommands::Status { format } => {
                let directory = self.directory()?;
                let entries = AgentCommandService::status(&directory, &self.dispatcher);
                if format == "json" {
                    let enabled_count = entries.iter().filter(|e| e.enabled).count();
                    to_json(&json!({
                        "agents": entries,
                        "total": entries.len(),
                        "enabled_count": enabled_count,
                    }))
                } else {
                    Ok(format_agent_status_text(&entries))
                }
            }
            AgentCommands::List { format, enabled } => {
                let directory = self.directory()?;
                let result = AgentCommandService::list(&directory, *enabled);
                match format.as_str() {
                    "json" => format_agent_list_json(&result),
                    _ => Ok(format_agent_list_text(&result)),
                }
            }
            AgentCommands::Show {
                name,
                format,
                include_prompt,
            } => {
                let directory = self.directory()?;
                let result = AgentCommandService::show(&directory, name, *include_prompt)?;
                match format.as_str() {
                    "json" => to_json(&result),
                    _ => Ok(format_agent_show_text(&result)),
                }
            }
            AgentCommands::Tools { name, format } => {
                let directory = self.directory()?;
                let result = AgentCommandService::tools(&directory, name)?;
                match format.as_str() {
                    "json" => to_json(&result),
                    _ => Ok(format_agent_tools_text(&result)),
                }
            }
            AgentCommands::Validate { name, all, verbose } => {
                self.handle_agent_validate(name.as_deref(), *all, *verbose)
            }
            AgentCommands::Create {
                name,
                display_name,
                description,
                tools,
                prompt,
                prompt_path,
                interactive,
                non_interactive,
            } => {
                let is_interactive =
                    *interactive || (!*non_interactive && display_name.is_none());
                let request = if is_interactive {
                    self.create_agent_interactive(name)?
                } else {
                    AgentCreateRequest {
                        name: name.clone(),
                        display_name: display_name.clone().ok_or_else(|| {
                            ApiError::ConfigError(
                                "Display name is required in non-interactive mode. Use --display-name <name>"
                                    .to_string(),
                            )
                        })?,
                        description: description.clone().unwrap_or_default(),
                        tools: tools.clone(),
                        system_prompt: prompt.clone(),
                        system_prompt_path: prompt_path.clone(),
                    }
                };
                self.handle_agent_create(request)
            }
            AgentCommands::Remove { name, force } => self.handle_agent_remove(name, *force),
        }
    }

    fn handle_agent_validate(
        &self,
        name: Option<&str>,
        all: bool,
        verbose: bool,
    ) -> Result<String, ApiError> {
        if all {
            let results = AgentCommandService::validate_all(&self.agents)?;
            return Ok(format_validation_results_all(&results, verbose));
        }
        let name = name.ok_or_else(|| {
            ApiError::ConfigError("Agent name required unless --all is specified".to_string())
        })?;
        let result = AgentCommandService::validate_single(&self.agents, name)?;
        Ok(format_validation_result(&result, verbose))
    }

    fn handle_agent_create(&self, request: AgentCreateRequest) -> Result<String, ApiError> {
        let directory = self.directory()?;
        let result = AgentCommandService::create(&self.agents, &directory, request)?;
        Ok(format!(
            "Agent created: {}\nConfiguration file: {}",
            result.name,
            result.config_path.display()
        ))
    }

    /// Interactive agent creation
    fn create_agent_interactive(&self, name: &str) -> Result<AgentCreateRequest, ApiError> {
        use dialoguer::{Input, MultiSelect};

        let input_error = |e: dialoguer::Error| {
            ApiError::ConfigError(format!("Failed to get user input: {}", e))
        };

        let display_name: String = Input::new()
            .with_prompt("Display name")
            .interact_text()
            .map_err(input_error)?;
        let description: String = Input::new()
            .with_prompt("Description")
            .allow_empty(true)
            .interact_text()
            .map_err(input_error)?;

        let choices: Vec<&str> = ToolId::ALL.iter().map(ToolId::as_str).collect();
        let selected = MultiSelect::new()
            .with_prompt("Tools (space to toggle)")
            .items(&choices)
            .interact()
            .map_err(input_error)?;
        let tools = selected.into_iter().map(|i| choices[i].to_string()).collect();

        let prompt_path: String = Input::new()
            .with_prompt("Prompt file path")
            .interact_text()
            .map_err(input_error)?;

        Ok(AgentCreateRequest {
            name: name.to_string(),
            display_name,
            description,
            tools,
            system_prompt: None,
            system_prompt_path: Some(prompt_path),
        })
    }

    /// Handle agent remove command
    fn handle_agent_remove(&self, name: &str, force: bool) -> Result<String, ApiError> {
        if !force {
            use dialoguer::Confirm;
            let confirmed = Confirm::new()
                .with_prompt(format!("Remove agent '{}'?", name))
                .interact()
                .map_err(|e| ApiError::ConfigError(format!("Failed to get user input: {}", e)))?;

            if !confirmed {
                return Ok("Removal cancelled".to_string());
            }
        }

        let result = AgentCommandService::remove(&self.agents, name)?;
        Ok(format!(
            "Removed agent: {}\nConfiguration file deleted: {}",
            result.name,
            result.config_path.display()
        ))
    }

    fn handle_session_command(&self, command: &SessionCommands) -> Result<String, ApiError> {
        match command {
            SessionCommands::List {
                agent,
                auto_saved,
                limit,
                format,
            } => {
                let query = SessionQuery {
                    agent_name: agent.clone(),
                    auto_saved_only: *auto_saved,
                    limit: *limit,
                };
                let sessions = self.sessions.list_sessions(&query)?;
                match format.as_str() {
                    "json" => to_json(&json!({ "sessions": sessions, "total": sessions.len() })),
                    _ => Ok(format_session_list_text(&sessions)),
                }
            }
            SessionCommands::Show { session_id, format } => {
                let messages = self.sessions.load_session(session_id)?;
                match format.as_str() {
                    "json" => to_json(&json!({ "session_id": session_id, "messages": messages })),
                    _ => Ok(format_session_messages_text(session_id, &messages)),
                }
            }
        }
    }

    fn handle_config_command(&self, command: &ConfigCommands) -> Result<String, ApiError> {
        match command {
            ConfigCommands::Show { format } => match format.as_str() {
                "json" => to_json(&self.config),
                _ => toml::to_string_pretty(&self.config).map_err(|e| {
                    ApiError::ConfigError(format!("Failed to render configuration: {}", e))
                }),
            },
        }
    }
}
