//! Top-level entry point for front ends: pick an agent, run a turn, persist it.

use crate::agent::directory::AgentDirectory;
use crate::config::TiccaConfig;
use crate::error::ApiError;
use crate::invocation::{AgentOutput, AgentRuntime, CancelSignal, InvocationGate};
use crate::session::{MessageRole, SessionStorage, StoredMessage};
use crate::tools::ToolDispatcher;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Agent used when neither the request nor configuration names one.
pub const FALLBACK_AGENT: &str = "web-searcher";

/// One user turn.
#[derive(Debug, Clone, Default)]
pub struct TurnRequest {
    /// Agent to run; falls back to the configured default agent.
    pub agent: Option<String>,
    pub input: String,
    /// Stored conversation to continue; a new one is started when unset.
    pub conversation_id: Option<String>,
    pub auto_saved: bool,
}

impl TurnRequest {
    pub fn new(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            ..Self::default()
        }
    }

    pub fn with_agent(mut self, agent: impl Into<String>) -> Self {
        self.agent = Some(agent.into());
        self
    }

    pub fn continuing(mut self, conversation_id: impl Into<String>) -> Self {
        self.conversation_id = Some(conversation_id.into());
        self
    }
}

#[derive(Debug, Clone)]
pub struct TurnOutcome {
    pub conversation_id: String,
    pub agent: String,
    pub output: AgentOutput,
}

pub struct AgentController {
    gate: Arc<InvocationGate>,
    storage: Arc<dyn SessionStorage>,
    default_agent: String,
}

impl AgentController {
    pub fn new(
        gate: Arc<InvocationGate>,
        storage: Arc<dyn SessionStorage>,
        default_agent: Option<String>,
    ) -> Self {
        Self {
            gate,
            storage,
            default_agent: default_agent.unwrap_or_else(|| FALLBACK_AGENT.to_string()),
        }
    }

    /// Wire a controller from a frozen directory and loaded configuration.
    pub fn from_parts(
        config: &TiccaConfig,
        directory: Arc<AgentDirectory>,
        runtime: Arc<dyn AgentRuntime>,
        dispatcher: Arc<ToolDispatcher>,
        storage: Arc<dyn SessionStorage>,
    ) -> Self {
        let missing = dispatcher.missing_handlers(&directory);
        if !missing.is_empty() {
            debug!(tools = ?missing, "Granted tools without a handler");
        }
        let gate = InvocationGate::new(directory, runtime, dispatcher, config.delegation.clone());
        Self::new(Arc::new(gate), storage, config.default_agent.clone())
    }

    pub fn gate(&self) -> &InvocationGate {
        &self.gate
    }

    pub fn default_agent(&self) -> &str {
        &self.default_agent
    }

    /// Run one turn to completion.
    ///
    /// The runtime sees the stored conversation as history, and the turn is
    /// appended to it afterwards. Storage failures are logged and do not
    /// affect the returned outcome.
    pub async fn run_turn(
        &self,
        request: TurnRequest,
        cancel: CancelSignal,
    ) -> Result<TurnOutcome, ApiError> {
        let agent = request
            .agent
            .clone()
            .unwrap_or_else(|| self.default_agent.clone());
        let session = self.gate.open_session(&agent, cancel)?;
        let conversation_id = request
            .conversation_id
            .clone()
            .unwrap_or_else(|| session.id().to_string());

        let history = self.load_history(&conversation_id);
        info!(
            agent = %agent,
            conversation = %conversation_id,
            history = history.len(),
            "Running turn"
        );
        let result = self
            .gate
            .run_session_with_history(
                session,
                Value::String(request.input.clone()),
                history.clone(),
            )
            .await;

        let mut reply = match &result {
            Ok(output) => StoredMessage::new(MessageRole::Assistant, output.text.clone()),
            Err(err) => StoredMessage::new(MessageRole::System, err.to_string())
                .with_metadata(json!({ "error_kind": err.kind() })),
        };
        if let Ok(AgentOutput { data: Some(data), .. }) = &result {
            reply = reply.with_metadata(data.clone());
        }
        self.persist(&conversation_id, &agent, &request, history, reply);

        let output = result?;
        Ok(TurnOutcome {
            conversation_id,
            agent,
            output,
        })
    }

    fn load_history(&self, conversation_id: &str) -> Vec<StoredMessage> {
        match self.storage.load_session(conversation_id) {
            Ok(messages) => messages,
            Err(e) => {
                warn!(conversation = %conversation_id, error = %e, "Failed to load conversation");
                Vec::new()
            }
        }
    }

    fn persist(
        &self,
        conversation_id: &str,
        agent: &str,
        request: &TurnRequest,
        mut messages: Vec<StoredMessage>,
        reply: StoredMessage,
    ) {
        messages.push(StoredMessage::new(MessageRole::User, request.input.clone()));
        messages.push(reply);

        if let Err(e) =
            self.storage
                .save_session(conversation_id, &messages, agent, request.auto_saved)
        {
            warn!(conversation = %conversation_id, error = %e, "Failed to save conversation");
        }
    }
}
