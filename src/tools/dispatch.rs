//! Tool handler table.
//!
//! The core does not implement tool bodies (browser control, shell commands, file
//! access); hosts register handlers here. `list_agents` and `invoke_agent` are
//! resolved by the session bridge and can never be registered.

use crate::agent::capability::ToolId;
use crate::agent::directory::AgentDirectory;
use crate::error::ApiError;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;
use tracing::{debug, info};

/// Who is calling a tool.
#[derive(Debug, Clone)]
pub struct ToolContext {
    pub agent_name: String,
    pub session_id: String,
}

/// Body of one tool.
#[async_trait]
pub trait ToolHandler: Send + Sync {
    async fn call(&self, context: &ToolContext, arguments: Value) -> anyhow::Result<Value>;
}

/// Handler backed by a plain closure.
#[derive(Clone)]
pub struct FnTool {
    handler: Arc<dyn Fn(&ToolContext, Value) -> anyhow::Result<Value> + Send + Sync>,
}

impl FnTool {
    pub fn new<F>(handler: F) -> Self
    where
        F: Fn(&ToolContext, Value) -> anyhow::Result<Value> + Send + Sync + 'static,
    {
        Self {
            handler: Arc::new(handler),
        }
    }
}

#[async_trait]
impl ToolHandler for FnTool {
    async fn call(&self, context: &ToolContext, arguments: Value) -> anyhow::Result<Value> {
        (self.handler)(context, arguments)
    }
}

/// `agent_share_your_reasoning`: records the agent's reasoning in the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct ShareReasoningTool;

#[async_trait]
impl ToolHandler for ShareReasoningTool {
    async fn call(&self, context: &ToolContext, arguments: Value) -> anyhow::Result<Value> {
        let reasoning = arguments
            .get("reasoning")
            .and_then(Value::as_str)
            .ok_or_else(|| anyhow::anyhow!("missing string field 'reasoning'"))?;
        let next_steps = arguments.get("next_steps").and_then(Value::as_str);
        info!(
            agent = %context.agent_name,
            session = %context.session_id,
            reasoning,
            next_steps,
            "Agent reasoning"
        );
        Ok(serde_json::json!({ "success": true }))
    }
}

/// Handlers keyed by tool identifier.
#[derive(Default)]
pub struct ToolDispatcher {
    handlers: HashMap<ToolId, Arc<dyn ToolHandler>>,
}

impl ToolDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// A dispatcher carrying the handlers the core ships with.
    pub fn with_defaults() -> Self {
        let mut dispatcher = Self::new();
        dispatcher.handlers.insert(ToolId::ShareReasoning, Arc::new(ShareReasoningTool));
        dispatcher
    }

    pub fn register(&mut self, tool: ToolId, handler: Arc<dyn ToolHandler>) -> Result<(), ApiError> {
        if matches!(tool, ToolId::ListAgents | ToolId::InvokeAgent) {
            return Err(ApiError::ConfigError(format!(
                "Tool '{}' is provided by the invocation gate",
                tool
            )));
        }
        if self.handlers.contains_key(&tool) {
            return Err(ApiError::ConfigError(format!(
                "Tool '{}' already has a handler",
                tool
            )));
        }
        debug!(tool = %tool, "Registered tool handler");
        self.handlers.insert(tool, handler);
        Ok(())
    }

    pub fn has_handler(&self, tool: ToolId) -> bool {
        self.handlers.contains_key(&tool)
    }

    /// Run a tool's handler. Permission checks happen before this point.
    pub async fn dispatch(
        &self,
        tool: ToolId,
        context: &ToolContext,
        arguments: Value,
    ) -> Result<Value, ApiError> {
        let handler = self
            .handlers
            .get(&tool)
            .ok_or_else(|| ApiError::ToolUnavailable(tool.to_string()))?;
        handler
            .call(context, arguments)
            .await
            .map_err(|e| ApiError::ToolFailed {
                tool: tool.to_string(),
                message: format!("{:#}", e),
            })
    }

    /// Tools granted to some registered agent that have no handler yet.
    pub fn missing_handlers(&self, directory: &AgentDirectory) -> Vec<ToolId> {
        let missing: BTreeSet<ToolId> = directory
            .iter()
            .flat_map(|agent| agent.capabilities.iter().copied())
            .filter(|tool| !matches!(tool, ToolId::ListAgents | ToolId::InvokeAgent))
            .filter(|tool| !self.handlers.contains_key(tool))
            .collect();
        missing.into_iter().collect()
    }
}
