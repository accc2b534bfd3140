//! Per-agent reasoning session and its discovery state.

use crate::agent::directory::RegisteredAgent;
use crate::invocation::cancel::CancelSignal;
use serde::Serialize;
use std::sync::Arc;

/// Discovery state of one reasoning session.
///
/// Sessions start `Undiscovered`; listing the directory moves them to `Discovered`,
/// and only discovered sessions may invoke other agents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscoveryState {
    Undiscovered,
    Discovered,
}

/// One agent instance's reasoning session.
#[derive(Debug, Clone)]
pub struct AgentSession {
    id: String,
    agent: Arc<RegisteredAgent>,
    state: DiscoveryState,
    depth: usize,
    caller: Option<String>,
    cancel: CancelSignal,
}

impl AgentSession {
    /// A top-level session opened by a front end or controller.
    pub(crate) fn top_level(agent: Arc<RegisteredAgent>, cancel: CancelSignal) -> Self {
        Self::with_parent(agent, 0, None, cancel)
    }

    /// A session for a delegated call, one level below its caller.
    pub(crate) fn delegated(
        agent: Arc<RegisteredAgent>,
        caller: &AgentSession,
    ) -> Self {
        Self::with_parent(
            agent,
            caller.depth + 1,
            Some(caller.agent_name().to_string()),
            caller.cancel.clone(),
        )
    }

    fn with_parent(
        agent: Arc<RegisteredAgent>,
        depth: usize,
        caller: Option<String>,
        cancel: CancelSignal,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            agent,
            state: DiscoveryState::Undiscovered,
            depth,
            caller,
            cancel,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn agent(&self) -> &Arc<RegisteredAgent> {
        &self.agent
    }

    pub fn agent_name(&self) -> &str {
        self.agent.name()
    }

    pub fn state(&self) -> DiscoveryState {
        self.state
    }

    pub fn is_discovered(&self) -> bool {
        self.state == DiscoveryState::Discovered
    }

    /// Nesting level: 0 for top-level sessions.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Name of the agent that delegated to this session, if any.
    pub fn caller(&self) -> Option<&str> {
        self.caller.as_deref()
    }

    pub fn cancel_signal(&self) -> &CancelSignal {
        &self.cancel
    }

    pub(crate) fn mark_discovered(&mut self) {
        self.state = DiscoveryState::Discovered;
    }
}
