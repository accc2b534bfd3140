//! Conversation persistence behind a storage trait.
//!
//! The controller writes every finished turn through `SessionStorage`. Storage
//! is best-effort: callers log failures and keep going.

pub mod memory;
pub mod persistent;

pub use memory::InMemorySessionStorage;
pub use persistent::SledSessionStorage;

use crate::config::{SessionBackend, SessionConfig};
use crate::error::ApiError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// Message author.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
    System,
    Tool,
}

/// One persisted message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredMessage {
    pub role: MessageRole,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_call_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
}

impl StoredMessage {
    pub fn new(role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            timestamp: Utc::now(),
            tool_name: None,
            tool_call_id: None,
            metadata: None,
        }
    }

    pub fn with_metadata(mut self, metadata: Value) -> Self {
        self.metadata = Some(metadata);
        self
    }
}

/// Listing entry for a stored session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub session_id: String,
    pub agent_name: String,
    pub message_count: usize,
    pub auto_saved: bool,
    pub updated_at: DateTime<Utc>,
}

/// Filter for `list_sessions`.
#[derive(Debug, Clone)]
pub struct SessionQuery {
    pub agent_name: Option<String>,
    pub auto_saved_only: bool,
    pub limit: usize,
}

impl Default for SessionQuery {
    fn default() -> Self {
        Self {
            agent_name: None,
            auto_saved_only: false,
            limit: 100,
        }
    }
}

impl SessionQuery {
    pub fn matches(&self, summary: &SessionSummary) -> bool {
        if self.auto_saved_only && !summary.auto_saved {
            return false;
        }
        match &self.agent_name {
            Some(agent) => &summary.agent_name == agent,
            None => true,
        }
    }
}

/// One semantic search hit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    pub session_id: String,
    pub message: StoredMessage,
    pub score: f32,
}

/// Session persistence contract.
pub trait SessionStorage: Send + Sync {
    /// Replace the stored messages of a session.
    fn save_session(
        &self,
        session_id: &str,
        messages: &[StoredMessage],
        agent_name: &str,
        auto_saved: bool,
    ) -> Result<(), ApiError>;

    /// Messages of a session; empty when the session is unknown.
    fn load_session(&self, session_id: &str) -> Result<Vec<StoredMessage>, ApiError>;

    /// Most recently updated sessions first.
    fn list_sessions(&self, query: &SessionQuery) -> Result<Vec<SessionSummary>, ApiError>;

    /// Backends without a vector index return no hits.
    fn semantic_search(
        &self,
        _query: &str,
        _n_results: usize,
        _agent_name: Option<&str>,
    ) -> Result<Vec<SearchHit>, ApiError> {
        Ok(Vec::new())
    }
}

/// Storage that keeps nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopSessionStorage;

impl SessionStorage for NoopSessionStorage {
    fn save_session(
        &self,
        _session_id: &str,
        _messages: &[StoredMessage],
        _agent_name: &str,
        _auto_saved: bool,
    ) -> Result<(), ApiError> {
        Ok(())
    }

    fn load_session(&self, _session_id: &str) -> Result<Vec<StoredMessage>, ApiError> {
        Ok(Vec::new())
    }

    fn list_sessions(&self, _query: &SessionQuery) -> Result<Vec<SessionSummary>, ApiError> {
        Ok(Vec::new())
    }
}

/// Open the backend selected by configuration.
pub fn open_storage(
    config: &SessionConfig,
    workspace_root: &Path,
) -> Result<Arc<dyn SessionStorage>, ApiError> {
    let storage: Arc<dyn SessionStorage> = match config.backend {
        SessionBackend::None => Arc::new(NoopSessionStorage),
        SessionBackend::Memory => Arc::new(InMemorySessionStorage::new()),
        SessionBackend::Sled => {
            let path = config.resolve_path(workspace_root)?;
            Arc::new(SledSessionStorage::open(&path)?)
        }
    };
    info!(backend = ?config.backend, "Session storage ready");
    Ok(storage)
}
