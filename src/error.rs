//! Error types for the agent directory, invocation gate, and ambient layers.

use std::time::Duration;
use thiserror::Error;

/// Errors surfaced by the ticca core.
///
/// Registration-time errors (`ConfigError`, `DuplicateAgent`) are fatal to startup.
/// Lookup, ordering, and tool errors raised inside a reasoning session are
/// recoverable and are handed back to the calling agent as structured tool results.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Agent '{0}' is already registered")]
    DuplicateAgent(String),

    #[error("Agent not found: {0}")]
    AgentNotFound(String),

    #[error("Agent '{0}' is disabled by configuration")]
    AgentDisabled(String),

    #[error(
        "Agent '{caller}' must call list_agents before invoke_agent (target: '{target}')"
    )]
    InvocationOrder { caller: String, target: String },

    #[error("Delegation to '{target}' failed ({}): {source}", .source.kind())]
    Delegation {
        target: String,
        #[source]
        source: Box<ApiError>,
    },

    #[error("Delegation depth limit of {max_depth} reached")]
    DepthLimitExceeded { max_depth: usize },

    #[error("Agent run timed out after {}s", .0.as_secs())]
    Timeout(Duration),

    #[error("Invocation cancelled")]
    Cancelled,

    #[error("Unknown tool identifier: {0}")]
    UnknownTool(String),

    #[error("Agent '{agent}' is not permitted to call tool '{tool}'")]
    ToolNotPermitted { agent: String, tool: String },

    #[error("No handler registered for tool '{0}'")]
    ToolUnavailable(String),

    #[error("Tool '{tool}' failed: {message}")]
    ToolFailed { tool: String, message: String },

    #[error("Agent runtime error: {0}")]
    RuntimeError(String),

    #[error("Storage error: {0}")]
    StorageError(String),
}

impl ApiError {
    /// Wrap a target agent's failure as a delegation error.
    pub fn delegation(target: impl Into<String>, source: ApiError) -> Self {
        ApiError::Delegation {
            target: target.into(),
            source: Box::new(source),
        }
    }

    /// Stable snake_case name of the failure kind, used in tool results and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::ConfigError(_) => "configuration_error",
            ApiError::DuplicateAgent(_) => "duplicate_agent",
            ApiError::AgentNotFound(_) => "agent_not_found",
            ApiError::AgentDisabled(_) => "agent_disabled",
            ApiError::InvocationOrder { .. } => "invocation_order",
            ApiError::Delegation { .. } => "delegation_error",
            ApiError::DepthLimitExceeded { .. } => "depth_limit_exceeded",
            ApiError::Timeout(_) => "timeout",
            ApiError::Cancelled => "cancelled",
            ApiError::UnknownTool(_) => "unknown_tool",
            ApiError::ToolNotPermitted { .. } => "tool_not_permitted",
            ApiError::ToolUnavailable(_) => "tool_unavailable",
            ApiError::ToolFailed { .. } => "tool_failed",
            ApiError::RuntimeError(_) => "runtime_error",
            ApiError::StorageError(_) => "storage_error",
        }
    }

    /// Innermost error of a delegation chain.
    pub fn root_cause(&self) -> &ApiError {
        match self {
            ApiError::Delegation { source, .. } => source.root_cause(),
            other => other,
        }
    }

    /// Whether the error aborts process startup rather than being reported to a session.
    pub fn is_fatal(&self) -> bool {
        matches!(self, ApiError::ConfigError(_) | ApiError::DuplicateAgent(_))
    }
}

impl From<config::ConfigError> for ApiError {
    fn from(err: config::ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}

impl From<sled::Error> for ApiError {
    fn from(err: sled::Error) -> Self {
        ApiError::StorageError(err.to_string())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::StorageError(format!("Serialization failed: {}", err))
    }
}
