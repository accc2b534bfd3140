use crate::agent::capability::{CapabilitySet, ToolId};
use crate::agent::descriptor::{AgentDefinition, AgentDescriptor};
use crate::error::ApiError;

/// Web research and information gathering through browser automation.
pub struct WebSearcherAgent;

impl AgentDefinition for WebSearcherAgent {
    fn descriptor(&self) -> AgentDescriptor {
        AgentDescriptor::new(
            "web-searcher",
            "Web Searcher",
            "Web research, information gathering, and search result analysis using browser automation",
        )
    }

    fn capabilities(&self) -> Result<CapabilitySet, ApiError> {
        CapabilitySet::new(vec![
            ToolId::ShareReasoning,
            ToolId::ListAgents,
            ToolId::InvokeAgent,
            ToolId::BrowserInitialize,
            ToolId::BrowserClose,
            ToolId::BrowserStatus,
            ToolId::BrowserNewPage,
            ToolId::BrowserListPages,
            ToolId::BrowserNavigate,
            ToolId::BrowserGetPageInfo,
            ToolId::BrowserGoBack,
            ToolId::BrowserGoForward,
            ToolId::BrowserReload,
            ToolId::BrowserWaitForLoad,
            ToolId::BrowserFindByRole,
            ToolId::BrowserFindByText,
            ToolId::BrowserFindByLabel,
            ToolId::BrowserFindByPlaceholder,
            ToolId::BrowserFindButtons,
            ToolId::BrowserFindLinks,
            ToolId::BrowserXpathQuery,
            ToolId::BrowserClick,
            ToolId::BrowserSetText,
            ToolId::BrowserGetText,
            ToolId::BrowserGetValue,
            ToolId::BrowserExecuteJs,
            ToolId::BrowserScroll,
            ToolId::BrowserWaitForElement,
            ToolId::BrowserScreenshotAnalyze,
        ])
    }

    fn system_prompt(&self) -> String {
        include_str!("prompts/web_searcher.md").to_string()
    }
}
