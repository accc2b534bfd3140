//! Tool calls, tool results, and capability-checked dispatch.

pub mod bridge;
pub mod dispatch;

pub use bridge::SessionTools;
pub use dispatch::{FnTool, ShareReasoningTool, ToolContext, ToolDispatcher, ToolHandler};

use crate::error::ApiError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A tool call as emitted by the runtime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub arguments: Value,
}

impl ToolCall {
    pub fn new(name: impl Into<String>, arguments: Value) -> Self {
        Self {
            id: None,
            name: name.into(),
            arguments,
        }
    }
}

/// Outcome of one tool call, handed back to the reasoning loop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ToolResult {
    Success {
        tool: String,
        output: Value,
    },
    Failure {
        tool: String,
        kind: String,
        message: String,
    },
}

impl ToolResult {
    pub fn success(tool: impl Into<String>, output: Value) -> Self {
        ToolResult::Success {
            tool: tool.into(),
            output,
        }
    }

    pub fn failure(tool: impl Into<String>, err: &ApiError) -> Self {
        ToolResult::Failure {
            tool: tool.into(),
            kind: err.kind().to_string(),
            message: err.to_string(),
        }
    }

    pub fn from_result(tool: &str, result: Result<Value, ApiError>) -> Self {
        match result {
            Ok(output) => Self::success(tool, output),
            Err(err) => Self::failure(tool, &err),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ToolResult::Success { .. })
    }

    pub fn output(&self) -> Option<&Value> {
        match self {
            ToolResult::Success { output, .. } => Some(output),
            ToolResult::Failure { .. } => None,
        }
    }

    /// Failure kind, `None` on success.
    pub fn kind(&self) -> Option<&str> {
        match self {
            ToolResult::Success { .. } => None,
            ToolResult::Failure { kind, .. } => Some(kind),
        }
    }
}
