use std::sync::Arc;

use serde_json::json;
use ticca::config::{SessionBackend, SessionConfig, TiccaConfig};
use ticca::controller::{AgentController, TurnRequest};
use ticca::error::ApiError;
use ticca::invocation::CancelSignal;
use ticca::session::{
    open_storage, InMemorySessionStorage, MessageRole, NoopSessionStorage, SessionQuery,
    SessionStorage, StoredMessage, SearchHit,
};
use ticca::tools::ToolDispatcher;

use crate::integration::support::{builtin_directory, ScriptedRuntime, Step};

fn controller(runtime: ScriptedRuntime, storage: Arc<dyn SessionStorage>) -> AgentController {
    controller_with(Arc::new(runtime), storage)
}

fn controller_with(runtime: Arc<ScriptedRuntime>, storage: Arc<dyn SessionStorage>) -> AgentController {
    AgentController::from_parts(
        &TiccaConfig::default(),
        Arc::new(builtin_directory()),
        runtime,
        Arc::new(ToolDispatcher::with_defaults()),
        storage,
    )
}

/// Storage whose every operation fails.
struct BrokenStorage;

impl SessionStorage for BrokenStorage {
    fn save_session(&self, _: &str, _: &[StoredMessage], _: &str, _: bool) -> Result<(), ApiError> {
        Err(ApiError::StorageError("disk full".to_string()))
    }

    fn load_session(&self, _: &str) -> Result<Vec<StoredMessage>, ApiError> {
        Err(ApiError::StorageError("disk full".to_string()))
    }

    fn list_sessions(&self, _: &SessionQuery) -> Result<Vec<ticca::session::SessionSummary>, ApiError> {
        Err(ApiError::StorageError("disk full".to_string()))
    }

    fn semantic_search(&self, _: &str, _: usize, _: Option<&str>) -> Result<Vec<SearchHit>, ApiError> {
        Err(ApiError::StorageError("disk full".to_string()))
    }
}

#[tokio::test]
async fn turns_are_appended_to_the_conversation() {
    let storage = Arc::new(InMemorySessionStorage::new());
    let controller = controller(ScriptedRuntime::new(), storage.clone());
    assert_eq!(controller.default_agent(), "web-searcher");

    let first = controller
        .run_turn(TurnRequest::new("find docs"), CancelSignal::never())
        .await
        .unwrap();
    assert_eq!(first.agent, "web-searcher");
    assert_eq!(first.output.text, "web-searcher handled: find docs");

    controller
        .run_turn(
            TurnRequest::new("now commit").continuing(first.conversation_id.clone()),
            CancelSignal::never(),
        )
        .await
        .unwrap();

    let messages = storage.load_session(&first.conversation_id).unwrap();
    let roles: Vec<MessageRole> = messages.iter().map(|m| m.role).collect();
    assert_eq!(
        roles,
        vec![
            MessageRole::User,
            MessageRole::Assistant,
            MessageRole::User,
            MessageRole::Assistant
        ]
    );
    assert_eq!(messages[2].content, "now commit");

    let listed = storage.list_sessions(&SessionQuery::default()).unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].message_count, 4);
}

#[tokio::test]
async fn continued_turn_sees_earlier_messages() {
    let storage = Arc::new(InMemorySessionStorage::new());
    let runtime = Arc::new(ScriptedRuntime::new().script(
        "web-searcher",
        vec![
            Step::Call("list_agents", json!({})),
            Step::Call(
                "invoke_agent",
                json!({ "agent_name": "git-committer", "prompt": "commit" }),
            ),
        ],
    ));
    let controller = controller_with(runtime.clone(), storage);

    let first = controller
        .run_turn(TurnRequest::new("my name is Ada"), CancelSignal::never())
        .await
        .unwrap();
    controller
        .run_turn(
            TurnRequest::new("what is my name?").continuing(first.conversation_id),
            CancelSignal::never(),
        )
        .await
        .unwrap();

    // Runs: web-searcher, git-committer, web-searcher, git-committer.
    let histories = runtime.histories();
    assert_eq!(histories.len(), 4);
    assert!(histories[0].is_empty());
    assert_eq!(
        histories[2],
        vec![
            "my name is Ada".to_string(),
            "web-searcher handled: my name is Ada".to_string()
        ]
    );
    // Delegated runs start without the caller's conversation.
    assert!(histories[1].is_empty());
    assert!(histories[3].is_empty());
}

#[tokio::test]
async fn failed_turn_is_recorded_and_returned() {
    let storage = Arc::new(InMemorySessionStorage::new());
    let runtime = ScriptedRuntime::new().script("git-committer", vec![Step::Fail("no model")]);
    let controller = controller(runtime, storage.clone());

    let err = controller
        .run_turn(
            TurnRequest::new("commit").with_agent("git-committer").continuing("conv-1"),
            CancelSignal::never(),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::RuntimeError(_)));

    let messages = storage.load_session("conv-1").unwrap();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[1].role, MessageRole::System);
    assert_eq!(messages[1].metadata, Some(json!({ "error_kind": "runtime_error" })));
}

#[tokio::test]
async fn storage_failures_do_not_break_turns() {
    for storage in [
        Arc::new(BrokenStorage) as Arc<dyn SessionStorage>,
        Arc::new(NoopSessionStorage),
    ] {
        let controller = controller(ScriptedRuntime::new(), storage);
        let outcome = controller
            .run_turn(TurnRequest::new("hello").with_agent("git-committer"), CancelSignal::never())
            .await
            .unwrap();
        assert_eq!(outcome.output.text, "git-committer handled: hello");
    }
}

#[tokio::test]
async fn unknown_agent_fails_before_running() {
    let controller = controller(ScriptedRuntime::new(), Arc::new(NoopSessionStorage));
    let err = controller
        .run_turn(TurnRequest::new("hi").with_agent("ghost"), CancelSignal::never())
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::AgentNotFound(name) if name == "ghost"));
}

#[test]
fn configured_backend_is_opened() {
    let temp = tempfile::tempdir().unwrap();
    let config = SessionConfig {
        backend: SessionBackend::Memory,
        ..SessionConfig::default()
    };
    let storage = open_storage(&config, temp.path()).unwrap();
    storage
        .save_session("s", &[StoredMessage::new(MessageRole::User, "x")], "web-searcher", true)
        .unwrap();
    assert_eq!(storage.load_session("s").unwrap().len(), 1);
    assert!(storage.semantic_search("x", 5, None).unwrap().is_empty());
}
