use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use serde_json::{json, Value};
use ticca::agent::{AgentDirectory, ToolId};
use ticca::config::{AgentSettings, DelegationConfig};
use ticca::invocation::CancelSignal;
use ticca::tools::{FnTool, ToolDispatcher};
use ticca::ApiError;

use crate::integration::support::{
    builtin_directory, gate_with, register, results, ScriptedRuntime, Step,
};

fn invoke(target: &str, prompt: &str) -> Step {
    Step::Call("invoke_agent", json!({ "agent_name": target, "prompt": prompt }))
}

fn list() -> Step {
    Step::Call("list_agents", json!({}))
}

#[test]
fn builtin_agents_register_list_and_resolve() {
    let directory = builtin_directory();

    let listed = directory.list_agents();
    let names: Vec<_> = listed.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(names, vec!["web-searcher", "git-committer"]);
    assert_eq!(listed[0].display_name, "Web Searcher");
    assert_eq!(listed[1].display_name, "Git Committer");
    assert_eq!(directory.list_agents(), listed);

    let agent = directory.get_agent("git-committer").unwrap();
    assert_eq!(agent.descriptor.display_name, "Git Committer");

    for name in ["web-searcher", "git-committer"] {
        let tools = directory.get_tools_for(name).unwrap();
        assert!(tools.contains(ToolId::ListAgents));
        assert!(tools.contains(ToolId::InvokeAgent));
    }

    assert!(matches!(
        directory.get_agent("nonexistent"),
        Err(ApiError::AgentNotFound(_))
    ));
}

#[tokio::test]
async fn invoke_before_list_fails_then_succeeds_after_discovery() {
    let runtime = Arc::new(ScriptedRuntime::new().script(
        "web-searcher",
        vec![
            invoke("git-committer", "Write a commit message"),
            list(),
            invoke("git-committer", "Write a commit message"),
        ],
    ));
    let gate = gate_with(
        builtin_directory(),
        runtime.clone(),
        ToolDispatcher::with_defaults(),
        DelegationConfig::default(),
    );

    let session = gate.open_session("web-searcher", CancelSignal::never()).unwrap();
    let output = gate
        .run_session(session, Value::String("Find the changelog".to_string()))
        .await
        .unwrap();
    let results = results(&output);

    assert_eq!(results[0]["status"], "failure");
    assert_eq!(results[0]["kind"], "invocation_order");

    assert_eq!(results[1]["status"], "success");
    let listed: Vec<&str> = results[1]["output"]["agents"]
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["name"].as_str().unwrap())
        .collect();
    assert_eq!(listed, vec!["web-searcher", "git-committer"]);

    assert_eq!(results[2]["status"], "success");
    assert_eq!(results[2]["output"]["agent_name"], "git-committer");
    assert_eq!(
        results[2]["output"]["response"],
        "git-committer handled: Write a commit message"
    );

    // The rejected call never started the target.
    assert_eq!(
        runtime.visits(),
        vec![
            ("web-searcher".to_string(), 0),
            ("git-committer".to_string(), 1),
        ]
    );
}

#[tokio::test]
async fn invoke_unknown_agent_is_a_delegation_error() {
    let gate = gate_with(
        builtin_directory(),
        Arc::new(ScriptedRuntime::new()),
        ToolDispatcher::new(),
        DelegationConfig::default(),
    );
    let mut session = gate.open_session("web-searcher", CancelSignal::never()).unwrap();
    gate.list_agents(&mut session);

    let err = gate
        .invoke_agent(&session, "unknown-agent", json!({}))
        .await
        .unwrap_err();
    match &err {
        ApiError::Delegation { target, source } => {
            assert_eq!(target, "unknown-agent");
            assert!(matches!(**source, ApiError::AgentNotFound(_)));
        }
        other => panic!("expected delegation error, got {other:?}"),
    }
    assert!(err.to_string().contains("unknown-agent"));
    assert!(err.to_string().contains("agent_not_found"));
}

#[tokio::test]
async fn discovery_is_per_session() {
    let runtime = Arc::new(
        ScriptedRuntime::new()
            .script("web-searcher", vec![list(), invoke("git-committer", "go")])
            .script("git-committer", vec![invoke("web-searcher", "back")]),
    );
    let gate = gate_with(
        builtin_directory(),
        runtime,
        ToolDispatcher::new(),
        DelegationConfig::default(),
    );

    let session = gate.open_session("web-searcher", CancelSignal::never()).unwrap();
    let output = gate.run_session(session, json!("start")).await.unwrap();
    let outer = results(&output);
    assert_eq!(outer[1]["status"], "success");

    // The child session starts undiscovered even though its caller listed agents.
    let inner = outer[1]["output"]["data"].as_array().unwrap();
    assert_eq!(inner[0]["kind"], "invocation_order");
}

#[tokio::test]
async fn tool_outside_capability_set_is_rejected() {
    let mut dispatcher = ToolDispatcher::with_defaults();
    dispatcher
        .register(
            ToolId::ReadFile,
            Arc::new(FnTool::new(|_, args| Ok(json!({ "content": format!("contents of {}", args["path"].as_str().unwrap_or("?")) })))),
        )
        .unwrap();
    let runtime = Arc::new(ScriptedRuntime::new().script(
        "git-committer",
        vec![
            Step::Call("browser_navigate", json!({ "url": "https://example.com" })),
            Step::Call("teleport", json!({})),
            Step::Call("read_file", json!({ "path": "CHANGELOG.md" })),
            Step::Call("list_files", json!({ "directory": "." })),
            Step::Call("agent_share_your_reasoning", json!({ "reasoning": "Reading the changelog" })),
        ],
    ));
    let gate = gate_with(builtin_directory(), runtime, dispatcher, DelegationConfig::default());

    let session = gate.open_session("git-committer", CancelSignal::never()).unwrap();
    let output = gate.run_session(session, json!("commit")).await.unwrap();
    let results = results(&output);

    assert_eq!(results[0]["kind"], "tool_not_permitted");
    assert_eq!(results[1]["kind"], "unknown_tool");
    assert_eq!(results[2]["status"], "success");
    assert_eq!(results[2]["output"]["content"], "contents of CHANGELOG.md");
    assert_eq!(results[3]["kind"], "tool_unavailable");
    assert_eq!(results[4]["status"], "success");
}

#[tokio::test]
async fn disabled_agents_are_hidden_and_refused() {
    let mut directory = builtin_directory();
    let mut settings = HashMap::new();
    settings.insert(
        "git-committer".to_string(),
        AgentSettings {
            enabled: false,
            model: None,
        },
    );
    directory.apply_settings(&settings);

    let runtime = Arc::new(ScriptedRuntime::new().script(
        "web-searcher",
        vec![list(), invoke("git-committer", "commit")],
    ));
    let gate = gate_with(directory, runtime, ToolDispatcher::new(), DelegationConfig::default());

    assert!(matches!(
        gate.open_session("git-committer", CancelSignal::never()),
        Err(ApiError::AgentDisabled(_))
    ));

    let session = gate.open_session("web-searcher", CancelSignal::never()).unwrap();
    let output = gate.run_session(session, json!("go")).await.unwrap();
    let results = results(&output);
    let listed = results[0]["output"]["agents"].as_array().unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0]["name"], "web-searcher");
    assert_eq!(results[1]["kind"], "delegation_error");
    assert!(results[1]["message"].as_str().unwrap().contains("agent_disabled"));
}

#[tokio::test]
async fn recursion_stops_at_depth_limit() {
    let mut directory = AgentDirectory::new();
    register(&mut directory, "looper", vec![ToolId::ReadFile]);
    let runtime = Arc::new(
        ScriptedRuntime::new().script("looper", vec![list(), invoke("looper", "again")]),
    );
    let gate = gate_with(
        directory,
        runtime.clone(),
        ToolDispatcher::new(),
        DelegationConfig {
            max_depth: 2,
            ..DelegationConfig::default()
        },
    );

    let session = gate.open_session("looper", CancelSignal::never()).unwrap();
    let output = gate.run_session(session, json!("start")).await.unwrap();

    let depths: Vec<usize> = runtime.visits().into_iter().map(|(_, depth)| depth).collect();
    assert_eq!(depths, vec![0, 1, 2]);

    let level1 = &results(&output)[1]["output"]["data"];
    let level2 = &level1[1]["output"]["data"];
    assert_eq!(level2[1]["kind"], "delegation_error");
    assert!(level2[1]["message"]
        .as_str()
        .unwrap()
        .contains("depth_limit_exceeded"));
}

#[tokio::test]
async fn target_runtime_failure_is_wrapped() {
    let runtime = Arc::new(
        ScriptedRuntime::new().script("git-committer", vec![Step::Fail("model unavailable")]),
    );
    let gate = gate_with(builtin_directory(), runtime, ToolDispatcher::new(), DelegationConfig::default());
    let mut session = gate.open_session("web-searcher", CancelSignal::never()).unwrap();
    gate.list_agents(&mut session);

    let err = gate
        .invoke_agent(&session, "git-committer", json!({ "prompt": "commit" }))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), "delegation_error");
    assert!(matches!(err.root_cause(), ApiError::RuntimeError(msg) if msg == "model unavailable"));
}

#[tokio::test(start_paused = true)]
async fn slow_target_times_out() {
    let runtime = Arc::new(
        ScriptedRuntime::new()
            .script("web-searcher", vec![list(), invoke("git-committer", "commit")])
            .script("git-committer", vec![Step::Sleep(Duration::from_secs(600))]),
    );
    let gate = gate_with(
        builtin_directory(),
        runtime,
        ToolDispatcher::new(),
        DelegationConfig {
            timeout_secs: 5,
            ..DelegationConfig::default()
        },
    );

    let session = gate.open_session("web-searcher", CancelSignal::never()).unwrap();
    let output = gate.run_session(session, json!("go")).await.unwrap();
    let results = results(&output);
    assert_eq!(results[1]["kind"], "delegation_error");
    assert!(results[1]["message"].as_str().unwrap().contains("timeout"));
}

#[tokio::test]
async fn cancellation_reaches_running_target() {
    let runtime = Arc::new(
        ScriptedRuntime::new().script("git-committer", vec![Step::Sleep(Duration::from_secs(30))]),
    );
    let gate = gate_with(builtin_directory(), runtime, ToolDispatcher::new(), DelegationConfig::default());
    let (handle, signal) = CancelSignal::pair();
    let mut session = gate.open_session("web-searcher", signal).unwrap();
    gate.list_agents(&mut session);

    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(20)).await;
        handle.cancel();
    });

    let err = tokio::time::timeout(
        Duration::from_secs(5),
        gate.invoke_agent(&session, "git-committer", json!({})),
    )
    .await
    .expect("cancellation should end the call promptly")
    .unwrap_err();
    assert!(matches!(err.root_cause(), ApiError::Cancelled));
}
