use crate::agent::capability::{CapabilitySet, ToolId};
use crate::agent::descriptor::{AgentDefinition, AgentDescriptor};
use crate::error::ApiError;

/// Commit message generation from staged changes.
pub struct GitCommitterAgent;

impl AgentDefinition for GitCommitterAgent {
    fn descriptor(&self) -> AgentDescriptor {
        AgentDescriptor::new(
            "git-committer",
            "Git Committer",
            "Generates commit messages from staged git changes",
        )
    }

    fn capabilities(&self) -> Result<CapabilitySet, ApiError> {
        CapabilitySet::new(vec![
            ToolId::ShareReasoning,
            ToolId::ListAgents,
            ToolId::InvokeAgent,
            ToolId::RunShellCommand,
            ToolId::ListFiles,
            ToolId::ReadFile,
        ])
    }

    fn system_prompt(&self) -> String {
        include_str!("prompts/git_committer.md").to_string()
    }
}
