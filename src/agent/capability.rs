//! Tool identifiers and per-agent capability registries.

use crate::error::ApiError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

macro_rules! tool_ids {
    ($($variant:ident => $id:literal),+ $(,)?) => {
        /// Closed set of tool identifiers an agent may be granted.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub enum ToolId {
            $(
                #[serde(rename = $id)]
                $variant,
            )+
        }

        impl ToolId {
            /// Every known tool identifier, in declaration order.
            pub const ALL: &'static [ToolId] = &[$(ToolId::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $(ToolId::$variant => $id,)+
                }
            }
        }

        impl FromStr for ToolId {
            type Err = ApiError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($id => Ok(ToolId::$variant),)+
                    _ => Err(ApiError::UnknownTool(s.to_string())),
                }
            }
        }
    };
}

tool_ids! {
    // Core agent tools
    ShareReasoning => "agent_share_your_reasoning",
    ListAgents => "list_agents",
    InvokeAgent => "invoke_agent",
    RunShellCommand => "agent_run_shell_command",
    // File operations
    ListFiles => "list_files",
    ReadFile => "read_file",
    Grep => "grep",
    EditFile => "edit_file",
    DeleteFile => "delete_file",
    // Browser control
    BrowserInitialize => "browser_initialize",
    BrowserClose => "browser_close",
    BrowserStatus => "browser_status",
    BrowserNewPage => "browser_new_page",
    BrowserListPages => "browser_list_pages",
    // Browser navigation
    BrowserNavigate => "browser_navigate",
    BrowserGetPageInfo => "browser_get_page_info",
    BrowserGoBack => "browser_go_back",
    BrowserGoForward => "browser_go_forward",
    BrowserReload => "browser_reload",
    BrowserWaitForLoad => "browser_wait_for_load",
    // Element discovery
    BrowserFindByRole => "browser_find_by_role",
    BrowserFindByText => "browser_find_by_text",
    BrowserFindByLabel => "browser_find_by_label",
    BrowserFindByPlaceholder => "browser_find_by_placeholder",
    BrowserFindButtons => "browser_find_buttons",
    BrowserFindLinks => "browser_find_links",
    BrowserXpathQuery => "browser_xpath_query",
    // Element interactions
    BrowserClick => "browser_click",
    BrowserSetText => "browser_set_text",
    BrowserGetText => "browser_get_text",
    BrowserGetValue => "browser_get_value",
    // Advanced
    BrowserExecuteJs => "browser_execute_js",
    BrowserScroll => "browser_scroll",
    BrowserWaitForElement => "browser_wait_for_element",
    BrowserScreenshotAnalyze => "browser_screenshot_analyze",
}

/// Discovery and invocation primitives every agent carries so it can take part in delegation.
pub const BASELINE_TOOLS: [ToolId; 2] = [ToolId::ListAgents, ToolId::InvokeAgent];

impl fmt::Display for ToolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered, duplicate-free set of tools granted to one agent.
///
/// Fixed at registration; there are no runtime grants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CapabilitySet {
    tools: Vec<ToolId>,
}

impl CapabilitySet {
    /// Build a capability set from the declared tools.
    ///
    /// Fails on an empty list or a repeated identifier. Baseline tools the
    /// declaration omits are appended in baseline order.
    pub fn new(declared: Vec<ToolId>) -> Result<Self, ApiError> {
        if declared.is_empty() {
            return Err(ApiError::ConfigError(
                "Capability list cannot be empty".to_string(),
            ));
        }

        let mut tools: Vec<ToolId> = Vec::with_capacity(declared.len() + BASELINE_TOOLS.len());
        for tool in declared {
            if tools.contains(&tool) {
                return Err(ApiError::ConfigError(format!(
                    "Duplicate tool identifier in capability list: {}",
                    tool
                )));
            }
            tools.push(tool);
        }

        for tool in BASELINE_TOOLS {
            if !tools.contains(&tool) {
                tools.push(tool);
            }
        }

        Ok(Self { tools })
    }

    /// Parse tool identifiers from configuration strings.
    ///
    /// Typos surface here as `ConfigError` instead of at dispatch time.
    pub fn parse<S: AsRef<str>>(names: &[S]) -> Result<Self, ApiError> {
        let mut declared = Vec::with_capacity(names.len());
        for name in names {
            let tool = name.as_ref().trim().parse::<ToolId>().map_err(|_| {
                ApiError::ConfigError(format!("Unknown tool identifier: '{}'", name.as_ref()))
            })?;
            declared.push(tool);
        }
        Self::new(declared)
    }

    pub fn contains(&self, tool: ToolId) -> bool {
        self.tools.contains(&tool)
    }

    /// Check a tool name emitted by the runtime against this set.
    pub fn permits(&self, name: &str) -> Option<ToolId> {
        name.parse::<ToolId>().ok().filter(|tool| self.contains(*tool))
    }

    pub fn tools(&self) -> &[ToolId] {
        &self.tools
    }

    pub fn iter(&self) -> impl Iterator<Item = &ToolId> {
        self.tools.iter()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.tools.iter().map(ToolId::as_str).collect()
    }
}
