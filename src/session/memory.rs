//! Process-local session storage.

use crate::error::ApiError;
use crate::session::{SessionQuery, SessionStorage, SessionSummary, StoredMessage};
use chrono::Utc;
use parking_lot::RwLock;
use std::collections::HashMap;

#[derive(Debug, Clone)]
struct StoredSession {
    summary: SessionSummary,
    messages: Vec<StoredMessage>,
}

#[derive(Debug, Default)]
pub struct InMemorySessionStorage {
    sessions: RwLock<HashMap<String, StoredSession>>,
}

impl InMemorySessionStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.sessions.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.read().is_empty()
    }
}

impl SessionStorage for InMemorySessionStorage {
    fn save_session(
        &self,
        session_id: &str,
        messages: &[StoredMessage],
        agent_name: &str,
        auto_saved: bool,
    ) -> Result<(), ApiError> {
        let summary = SessionSummary {
            session_id: session_id.to_string(),
            agent_name: agent_name.to_string(),
            message_count: messages.len(),
            auto_saved,
            updated_at: Utc::now(),
        };
        self.sessions.write().insert(
            session_id.to_string(),
            StoredSession {
                summary,
                messages: messages.to_vec(),
            },
        );
        Ok(())
    }

    fn load_session(&self, session_id: &str) -> Result<Vec<StoredMessage>, ApiError> {
        Ok(self
            .sessions
            .read()
            .get(session_id)
            .map(|session| session.messages.clone())
            .unwrap_or_default())
    }

    fn list_sessions(&self, query: &SessionQuery) -> Result<Vec<SessionSummary>, ApiError> {
        let mut summaries: Vec<SessionSummary> = self
            .sessions
            .read()
            .values()
            .map(|session| session.summary.clone())
            .filter(|summary| query.matches(summary))
            .collect();
        summaries.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        summaries.truncate(query.limit);
        Ok(summaries)
    }
}
