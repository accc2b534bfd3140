//! Invocation gate: discovery-before-invocation and nested agent execution.

use crate::agent::directory::{AgentDirectory, AgentSummary};
use crate::config::DelegationConfig;
use crate::error::ApiError;
use crate::invocation::cancel::CancelSignal;
use crate::invocation::record::InvocationRecord;
use crate::invocation::runtime::{AgentOutput, AgentRuntime, ReasoningContext};
use crate::invocation::session::AgentSession;
use crate::session::StoredMessage;
use crate::tools::{SessionTools, ToolDispatcher};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Mediates every cross-agent call.
///
/// Holds the read-only directory, the runtime, and the tool dispatch table; a
/// single gate may serve any number of concurrent sessions.
pub struct InvocationGate {
    directory: Arc<AgentDirectory>,
    runtime: Arc<dyn AgentRuntime>,
    dispatcher: Arc<ToolDispatcher>,
    policy: DelegationConfig,
}

impl InvocationGate {
    pub fn new(
        directory: Arc<AgentDirectory>,
        runtime: Arc<dyn AgentRuntime>,
        dispatcher: Arc<ToolDispatcher>,
        policy: DelegationConfig,
    ) -> Self {
        Self {
            directory,
            runtime,
            dispatcher,
            policy,
        }
    }

    pub fn directory(&self) -> &AgentDirectory {
        &self.directory
    }

    pub fn dispatcher(&self) -> &ToolDispatcher {
        &self.dispatcher
    }

    pub fn policy(&self) -> &DelegationConfig {
        &self.policy
    }

    /// Open a top-level session for an agent selected by name.
    pub fn open_session(&self, agent_name: &str, cancel: CancelSignal) -> Result<AgentSession, ApiError> {
        let agent = self.directory.get_agent(agent_name)?;
        if !agent.is_enabled() {
            return Err(ApiError::AgentDisabled(agent_name.to_string()));
        }
        let session = AgentSession::top_level(agent, cancel);
        debug!(agent = %agent_name, session = %session.id(), "Opened agent session");
        Ok(session)
    }

    /// Discovery listing for a session; marks the session discovered.
    ///
    /// Agents disabled by configuration are left out of the listing.
    pub fn list_agents(&self, session: &mut AgentSession) -> Vec<AgentSummary> {
        session.mark_discovered();
        debug!(agent = %session.agent_name(), session = %session.id(), "Agent discovery");
        self.directory
            .iter()
            .filter(|agent| agent.is_enabled())
            .map(|agent| agent.summary())
            .collect()
    }

    /// Run `target` on behalf of `session` and wait for its result.
    ///
    /// Fails with `InvocationOrder` if the session has not listed agents yet.
    /// Every other failure is wrapped in `Delegation` naming the target.
    pub async fn invoke_agent(
        &self,
        session: &AgentSession,
        target: &str,
        arguments: Value,
    ) -> Result<AgentOutput, ApiError> {
        let record =
            InvocationRecord::begin(session.agent_name(), target, &arguments, session.depth() + 1);

        if !session.is_discovered() {
            return record.complete(Err(ApiError::InvocationOrder {
                caller: session.agent_name().to_string(),
                target: target.to_string(),
            }));
        }

        let result = self
            .delegate(session, target, arguments)
            .await
            .map_err(|e| ApiError::delegation(target, e));
        record.complete(result)
    }

    async fn delegate(
        &self,
        session: &AgentSession,
        target: &str,
        arguments: Value,
    ) -> Result<AgentOutput, ApiError> {
        if session.cancel_signal().is_cancelled() {
            return Err(ApiError::Cancelled);
        }
        if session.depth() + 1 > self.policy.max_depth {
            return Err(ApiError::DepthLimitExceeded {
                max_depth: self.policy.max_depth,
            });
        }

        let agent = self.directory.get_agent(target)?;
        if !agent.is_enabled() {
            return Err(ApiError::AgentDisabled(target.to_string()));
        }

        let timeout = self.policy.timeout();
        self.execute(AgentSession::delegated(agent, session), arguments, Vec::new(), timeout)
            .await
    }

    /// Run a top-level session to completion.
    ///
    /// Only delegated calls are bounded by the delegation timeout; a top-level
    /// run ends when the runtime returns or the session is cancelled.
    pub async fn run_session(
        &self,
        session: AgentSession,
        input: Value,
    ) -> Result<AgentOutput, ApiError> {
        self.run_session_with_history(session, input, Vec::new()).await
    }

    /// Run a top-level session that continues a stored conversation.
    pub async fn run_session_with_history(
        &self,
        session: AgentSession,
        input: Value,
        history: Vec<StoredMessage>,
    ) -> Result<AgentOutput, ApiError> {
        if session.cancel_signal().is_cancelled() {
            return Err(ApiError::Cancelled);
        }
        self.execute(session, input, history, None).await
    }

    /// Drive the runtime for one session, bounded by `timeout` and cancellation.
    async fn execute(
        &self,
        session: AgentSession,
        input: Value,
        history: Vec<StoredMessage>,
        timeout: Option<Duration>,
    ) -> Result<AgentOutput, ApiError> {
        let context = ReasoningContext::for_session(&session, input, history);
        let cancel = session.cancel_signal().clone();
        let mut tools = SessionTools::new(self, session);

        let run = self.runtime.run(context, &mut tools);
        let bounded = async move {
            match timeout {
                Some(limit) => match tokio::time::timeout(limit, run).await {
                    Ok(result) => result,
                    Err(_) => Err(ApiError::Timeout(limit)),
                },
                None => run.await,
            }
        };

        tokio::select! {
            result = bounded => result,
            _ = cancel.cancelled() => Err(ApiError::Cancelled),
        }
    }
}
