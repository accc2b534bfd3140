//! Contract between the core and the LLM runtime that drives an agent.

use crate::agent::capability::CapabilitySet;
use crate::agent::descriptor::{AgentDescriptor, PromptBinding};
use crate::error::ApiError;
use crate::invocation::session::AgentSession;
use crate::session::StoredMessage;
use crate::tools::SessionTools;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Everything the runtime needs to act as one agent for one run.
#[derive(Debug, Clone)]
pub struct ReasoningContext {
    pub session_id: String,
    pub agent: AgentDescriptor,
    /// Tool calls outside this set are rejected by the session tools
    pub capabilities: CapabilitySet,
    pub prompt: PromptBinding,
    /// Model selected for this agent by configuration
    pub model: Option<String>,
    /// User message or delegated arguments
    pub input: Value,
    /// Earlier messages of the conversation, oldest first; empty for delegated runs
    pub history: Vec<StoredMessage>,
    /// Delegating agent, `None` for top-level runs
    pub caller: Option<String>,
    pub depth: usize,
}

impl ReasoningContext {
    pub(crate) fn for_session(
        session: &AgentSession,
        input: Value,
        history: Vec<StoredMessage>,
    ) -> Self {
        let agent = session.agent();
        Self {
            session_id: session.id().to_string(),
            agent: agent.descriptor.clone(),
            capabilities: agent.capabilities.clone(),
            prompt: agent.prompt.clone(),
            model: agent.settings.model.clone(),
            input,
            history,
            caller: session.caller().map(str::to_string),
            depth: session.depth(),
        }
    }

    /// The input as plain text: a bare string, the `prompt` field of an object, or JSON.
    pub fn input_text(&self) -> String {
        match &self.input {
            Value::String(text) => text.clone(),
            Value::Object(map) => match map.get("prompt") {
                Some(Value::String(prompt)) => prompt.clone(),
                _ => self.input.to_string(),
            },
            Value::Null => String::new(),
            other => other.to_string(),
        }
    }
}

/// Final result of an agent run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentOutput {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl AgentOutput {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            data: None,
        }
    }

    pub fn structured(text: impl Into<String>, data: Value) -> Self {
        Self {
            text: text.into(),
            data: Some(data),
        }
    }
}

/// The LLM runtime.
///
/// Implementations interpret the prompt binding, emit tool calls only through
/// `tools`, and return the agent's final answer.
#[async_trait]
pub trait AgentRuntime: Send + Sync {
    async fn run(
        &self,
        context: ReasoningContext,
        tools: &mut SessionTools<'_>,
    ) -> Result<AgentOutput, ApiError>;
}
