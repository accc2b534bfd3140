use proptest::prelude::*;
use ticca::agent::{AgentDescriptor, AgentDirectory, CapabilitySet, PromptBinding, ToolId, BASELINE_TOOLS};
use ticca::ApiError;

fn agent_name() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9]{0,6}(-[a-z0-9]{1,6}){0,2}"
}

fn tool_subset() -> impl Strategy<Value = Vec<ToolId>> {
    proptest::sample::subsequence(ToolId::ALL.to_vec(), 1..8)
}

fn try_register(directory: &mut AgentDirectory, name: &str, tools: Vec<ToolId>) -> Result<(), ApiError> {
    directory.register(
        AgentDescriptor::new(name, "Generated", "Generated agent"),
        CapabilitySet::new(tools)?,
        PromptBinding::new("Act.")?,
    )
}

proptest! {
    #[test]
    fn names_stay_distinct_and_duplicates_change_nothing(
        names in proptest::collection::vec(agent_name(), 1..12),
    ) {
        let mut directory = AgentDirectory::new();
        let mut accepted: Vec<String> = Vec::new();

        for name in &names {
            let before = directory.list_agents();
            match try_register(&mut directory, name, vec![ToolId::ReadFile]) {
                Ok(()) => {
                    prop_assert!(!accepted.contains(name));
                    accepted.push(name.clone());
                }
                Err(ApiError::DuplicateAgent(dup)) => {
                    prop_assert_eq!(&dup, name);
                    prop_assert_eq!(directory.list_agents(), before);
                }
                Err(other) => prop_assert!(false, "unexpected error: {}", other),
            }
        }

        let listed: Vec<String> = directory.list_agents().into_iter().map(|a| a.name).collect();
        prop_assert_eq!(&listed, &accepted);
        prop_assert_eq!(directory.list_agents(), directory.list_agents());
    }

    #[test]
    fn every_registry_contains_baseline_tools(tools in tool_subset()) {
        let mut directory = AgentDirectory::new();
        try_register(&mut directory, "generated", tools.clone()).unwrap();
        let registry = directory.get_tools_for("generated").unwrap();

        for tool in BASELINE_TOOLS {
            prop_assert!(registry.contains(tool));
        }
        // Declared tools keep their order at the front.
        prop_assert_eq!(&registry.tools()[..tools.len()], tools.as_slice());
    }

    #[test]
    fn lookups_never_match_partially(name in agent_name(), suffix in "[a-z]{1,3}") {
        let mut directory = AgentDirectory::new();
        try_register(&mut directory, &name, vec![ToolId::Grep]).unwrap();
        let longer = format!("{}{}", name, suffix);
        prop_assert!(matches!(directory.get_agent(&longer), Err(ApiError::AgentNotFound(_))));
        prop_assert!(directory.get_agent(&name).is_ok());
    }
}

#[test]
fn empty_and_duplicate_capabilities_are_rejected() {
    assert!(matches!(CapabilitySet::new(vec![]), Err(ApiError::ConfigError(_))));
    assert!(matches!(
        CapabilitySet::new(vec![ToolId::Grep, ToolId::Grep]),
        Err(ApiError::ConfigError(_))
    ));
    assert!(matches!(PromptBinding::new("   "), Err(ApiError::ConfigError(_))));
}

#[test]
fn malformed_names_are_rejected() {
    let mut directory = AgentDirectory::new();
    for name in ["", "Web-Searcher", "web_searcher", "-web", "web--searcher"] {
        assert!(
            matches!(try_register(&mut directory, name, vec![ToolId::Grep]), Err(ApiError::ConfigError(_))),
            "{name:?} should be rejected"
        );
    }
    assert!(directory.is_empty());
}

#[test]
fn definitions_register_like_explicit_parts() {
    use ticca::agent::AgentDefinition;

    struct Reviewer;

    impl AgentDefinition for Reviewer {
        fn descriptor(&self) -> AgentDescriptor {
            AgentDescriptor::new("code-reviewer", "Code Reviewer", "Reviews diffs")
        }

        fn capabilities(&self) -> Result<CapabilitySet, ApiError> {
            CapabilitySet::new(vec![ToolId::ReadFile, ToolId::Grep])
        }

        fn system_prompt(&self) -> String {
            "Review the diff.".to_string()
        }
    }

    let mut directory = AgentDirectory::new();
    directory.register_definition(&Reviewer).unwrap();
    assert!(matches!(
        directory.register_definition(&Reviewer),
        Err(ApiError::DuplicateAgent(_))
    ));
    assert_eq!(directory.len(), 1);
    let tools = directory.get_tools_for("code-reviewer").unwrap();
    assert_eq!(
        tools.tools(),
        &[ToolId::ReadFile, ToolId::Grep, ToolId::ListAgents, ToolId::InvokeAgent]
    );
}
