//! Agents shipped with ticca.

mod git_committer;
mod web_searcher;

pub use git_committer::GitCommitterAgent;
pub use web_searcher::WebSearcherAgent;

use crate::agent::descriptor::AgentDefinition;

/// Built-in agents in registration order.
pub fn builtin_agents() -> Vec<Box<dyn AgentDefinition>> {
    vec![Box::new(WebSearcherAgent), Box::new(GitCommitterAgent)]
}
