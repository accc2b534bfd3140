use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;
use ticca::agent::{
    AgentDescriptor, AgentDirectory, CapabilitySet, PromptBinding, ToolId, XdgAgentStorage,
};
use ticca::config::{DelegationConfig, TiccaConfig};
use ticca::tools::ToolDispatcher;
use ticca::{AgentOutput, AgentRuntime, ApiError, InvocationGate, ReasoningContext, SessionTools, ToolCall};

/// One scripted action of an agent run.
#[derive(Clone)]
pub enum Step {
    Call(&'static str, Value),
    Sleep(Duration),
    Fail(&'static str),
}

/// Runtime that replays a fixed tool-call script per agent.
///
/// The output data is the list of tool results in call order; the text echoes
/// the agent name and its input.
#[derive(Default)]
pub struct ScriptedRuntime {
    scripts: HashMap<String, Vec<Step>>,
    visits: Mutex<Vec<(String, usize)>>,
    histories: Mutex<Vec<Vec<String>>>,
}

impl ScriptedRuntime {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn script(mut self, agent: &str, steps: Vec<Step>) -> Self {
        self.scripts.insert(agent.to_string(), steps);
        self
    }

    /// `(agent, depth)` of every run, in start order.
    pub fn visits(&self) -> Vec<(String, usize)> {
        self.visits.lock().clone()
    }

    /// Contents of the conversation history handed to each run, in start order.
    pub fn histories(&self) -> Vec<Vec<String>> {
        self.histories.lock().clone()
    }
}

#[async_trait]
impl AgentRuntime for ScriptedRuntime {
    async fn run(
        &self,
        context: ReasoningContext,
        tools: &mut SessionTools<'_>,
    ) -> Result<AgentOutput, ApiError> {
        self.visits
            .lock()
            .push((context.agent.name.clone(), context.depth));
        self.histories
            .lock()
            .push(context.history.iter().map(|m| m.content.clone()).collect());

        let mut results = Vec::new();
        let steps = self.scripts.get(&context.agent.name).cloned().unwrap_or_default();
        for step in steps {
            match step {
                Step::Call(name, arguments) => {
                    results.push(tools.call(ToolCall::new(name, arguments)).await);
                }
                Step::Sleep(duration) => tokio::time::sleep(duration).await,
                Step::Fail(message) => return Err(ApiError::RuntimeError(message.to_string())),
            }
        }

        Ok(AgentOutput::structured(
            format!("{} handled: {}", context.agent.name, context.input_text()),
            serde_json::to_value(&results).unwrap(),
        ))
    }
}

pub fn register(directory: &mut AgentDirectory, name: &str, tools: Vec<ToolId>) {
    directory
        .register(
            AgentDescriptor::new(name, name, format!("{} test agent", name)),
            CapabilitySet::new(tools).unwrap(),
            PromptBinding::new("Call `list_agents` before calling `invoke_agent`.").unwrap(),
        )
        .unwrap();
}

/// Directory with the two built-in agents and no stored profiles.
pub fn builtin_directory() -> AgentDirectory {
    let temp = tempfile::tempdir().unwrap();
    let storage = XdgAgentStorage::with_root(temp.path());
    AgentDirectory::bootstrap(&TiccaConfig::default(), &storage).unwrap()
}

pub fn gate_with(
    directory: AgentDirectory,
    runtime: Arc<ScriptedRuntime>,
    dispatcher: ToolDispatcher,
    policy: DelegationConfig,
) -> InvocationGate {
    InvocationGate::new(Arc::new(directory), runtime, Arc::new(dispatcher), policy)
}

/// Tool results recorded by a scripted run.
pub fn results(output: &AgentOutput) -> Vec<Value> {
    output
        .data
        .as_ref()
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default()
}
