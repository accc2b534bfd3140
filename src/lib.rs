//! Ticca: capability-scoped agent dispatch.
//!
//! Agents are registered once into an [`agent::AgentDirectory`] with a closed set
//! of tools and a prompt. A running agent reaches other agents only through the
//! [`invocation::InvocationGate`], which requires `list_agents` before
//! `invoke_agent` in every session.

pub mod agent;
pub mod config;
pub mod controller;
pub mod error;
pub mod invocation;
pub mod logging;
pub mod session;
pub mod tooling;
pub mod tools;

pub use agent::{AgentDirectory, AgentSummary, CapabilitySet, ToolId};
pub use controller::{AgentController, TurnOutcome, TurnRequest};
pub use error::ApiError;
pub use invocation::{AgentOutput, AgentRuntime, CancelSignal, InvocationGate, ReasoningContext};
pub use tools::{SessionTools, ToolCall, ToolResult};
