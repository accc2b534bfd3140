//! Per-session tool bridge handed to the runtime.

use crate::agent::capability::ToolId;
use crate::agent::directory::AgentSummary;
use crate::error::ApiError;
use crate::invocation::gate::InvocationGate;
use crate::invocation::runtime::AgentOutput;
use crate::invocation::session::AgentSession;
use crate::tools::dispatch::ToolContext;
use crate::tools::{ToolCall, ToolResult};
use serde_json::{json, Map, Value};
use tracing::{debug, warn};

/// The only path from a running agent to its tools.
///
/// Every call is checked against the session agent's capability registry before
/// dispatch. `list_agents` and `invoke_agent` resolve to the invocation gate.
pub struct SessionTools<'a> {
    gate: &'a InvocationGate,
    session: AgentSession,
}

impl<'a> SessionTools<'a> {
    pub(crate) fn new(gate: &'a InvocationGate, session: AgentSession) -> Self {
        Self { gate, session }
    }

    pub fn session(&self) -> &AgentSession {
        &self.session
    }

    /// Discovery listing; unlocks `invoke_agent` for this session.
    pub fn list_agents(&mut self) -> Vec<AgentSummary> {
        self.gate.list_agents(&mut self.session)
    }

    /// Delegate to another agent and wait for its output.
    pub async fn invoke_agent(
        &self,
        target: &str,
        arguments: Value,
    ) -> Result<AgentOutput, ApiError> {
        self.gate.invoke_agent(&self.session, target, arguments).await
    }

    /// Execute a runtime tool call. Failures come back as `ToolResult::Failure`.
    pub async fn call(&mut self, call: ToolCall) -> ToolResult {
        let name = call.name.clone();
        let result = self.try_call(call).await;
        if let Err(err) = &result {
            warn!(
                agent = %self.session.agent_name(),
                session = %self.session.id(),
                tool = %name,
                kind = err.kind(),
                error = %err,
                "Tool call failed"
            );
        }
        ToolResult::from_result(&name, result)
    }

    async fn try_call(&mut self, call: ToolCall) -> Result<Value, ApiError> {
        let tool = self.permitted(&call.name)?;
        debug!(
            agent = %self.session.agent_name(),
            session = %self.session.id(),
            tool = %tool,
            "Tool call"
        );

        match tool {
            ToolId::ListAgents => Ok(json!({ "agents": self.list_agents() })),
            ToolId::InvokeAgent => {
                let (target, input) = split_invoke_arguments(call.arguments)?;
                let output = self.invoke_agent(&target, input).await?;
                let mut response = json!({
                    "agent_name": target,
                    "response": output.text,
                });
                if let Some(data) = output.data {
                    response["data"] = data;
                }
                Ok(response)
            }
            other => {
                let context = ToolContext {
                    agent_name: self.session.agent_name().to_string(),
                    session_id: self.session.id().to_string(),
                };
                self.gate
                    .dispatcher()
                    .dispatch(other, &context, call.arguments)
                    .await
            }
        }
    }

    /// Resolve a tool name and check it against the agent's capability registry.
    fn permitted(&self, name: &str) -> Result<ToolId, ApiError> {
        name.parse::<ToolId>()?;
        self.session
            .agent()
            .capabilities
            .permits(name)
            .ok_or_else(|| ApiError::ToolNotPermitted {
                agent: self.session.agent_name().to_string(),
                tool: name.to_string(),
            })
    }
}

/// `invoke_agent` arguments: `agent_name` plus the input for the target.
///
/// Remaining fields become the target's input object.
fn split_invoke_arguments(arguments: Value) -> Result<(String, Value), ApiError> {
    let mut fields: Map<String, Value> = match arguments {
        Value::Object(fields) => fields,
        other => {
            return Err(ApiError::ToolFailed {
                tool: ToolId::InvokeAgent.to_string(),
                message: format!("expected an object with 'agent_name', got {}", other),
            })
        }
    };
    let target = match fields.remove("agent_name") {
        Some(Value::String(name)) => name,
        _ => {
            return Err(ApiError::ToolFailed {
                tool: ToolId::InvokeAgent.to_string(),
                message: "missing string field 'agent_name'".to_string(),
            })
        }
    };
    Ok((target, Value::Object(fields)))
}
