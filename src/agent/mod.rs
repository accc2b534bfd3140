//! Agents: descriptors, capability registries, prompt bindings, and the directory.
//!
//! Built-in agents and user profiles are registered into one `AgentDirectory`
//! at startup; after that the directory is shared read-only.

pub mod builtin;
pub mod capability;
pub mod commands;
pub mod descriptor;
pub mod directory;
pub mod profile;
mod prompt;
pub mod storage;
pub mod validation;

pub use capability::{CapabilitySet, ToolId, BASELINE_TOOLS};
pub use commands::AgentCommandService;
pub use descriptor::{AgentDefinition, AgentDescriptor, PromptBinding};
pub use directory::{AgentDirectory, AgentSource, AgentSummary, RegisteredAgent};
pub use profile::{AgentConfig, ConfiguredAgent};
pub use prompt::{resolve_prompt_path, PromptCache};
pub use storage::{AgentStorage, StoredAgentConfig, XdgAgentStorage};
