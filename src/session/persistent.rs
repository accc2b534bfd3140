//! sled-backed session storage.
//!
//! Two trees: `summaries` (session id → summary JSON) and `messages`
//! (session id → message list JSON). A save writes both in one transaction.

use crate::error::ApiError;
use crate::session::{SessionQuery, SessionStorage, SessionSummary, StoredMessage};
use chrono::Utc;
use sled::transaction::{ConflictableTransactionError, TransactionError};
use sled::Transactional;
use std::path::Path;
use tracing::debug;

const SUMMARIES_TREE: &str = "summaries";
const MESSAGES_TREE: &str = "messages";

pub struct SledSessionStorage {
    summaries: sled::Tree,
    messages: sled::Tree,
}

impl SledSessionStorage {
    /// Open (or create) the database at `path`.
    pub fn open(path: &Path) -> Result<Self, ApiError> {
        std::fs::create_dir_all(path).map_err(|e| {
            ApiError::StorageError(format!(
                "Failed to create session directory {}: {}",
                path.display(),
                e
            ))
        })?;
        let db = sled::open(path)
            .map_err(|e| ApiError::StorageError(format!("Failed to open sled database: {}", e)))?;
        debug!(path = %path.display(), "Opened session database");
        Self::from_db(&db)
    }

    pub fn from_db(db: &sled::Db) -> Result<Self, ApiError> {
        Ok(Self {
            summaries: db.open_tree(SUMMARIES_TREE)?,
            messages: db.open_tree(MESSAGES_TREE)?,
        })
    }
}

impl SessionStorage for SledSessionStorage {
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
        let summary_bytes = serde_json::to_vec(&summary)?;
        let message_bytes = serde_json::to_vec(messages)?;

        (&self.summaries, &self.messages)
            .transaction(|(summaries, stored)| {
                summaries.insert(session_id.as_bytes(), summary_bytes.as_slice())?;
                stored.insert(session_id.as_bytes(), message_bytes.as_slice())?;
                Ok::<(), ConflictableTransactionError<()>>(())
            })
            .map_err(|e: TransactionError<()>| {
                ApiError::StorageError(format!("Failed to save session {}: {:?}", session_id, e))
            })?;
        self.messages.flush()?;
        Ok(())
    }

    fn load_session(&self, session_id: &str) -> Result<Vec<StoredMessage>, ApiError> {
        match self.messages.get(session_id.as_bytes())? {
            Some(bytes) => Ok(serde_json::from_slice(&bytes)?),
            None => Ok(Vec::new()),
        }
    }

    fn list_sessions(&self, query: &SessionQuery) -> Result<Vec<SessionSummary>, ApiError> {
        let mut summaries = Vec::new();
        for entry in self.summaries.iter() {
            let (_, bytes) = entry?;
            let summary: SessionSummary = serde_json::from_slice(&bytes)?;
            if query.matches(&summary) {
                summaries.push(summary);
            }
        }
        summaries.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        summaries.truncate(query.limit);
        Ok(summaries)
    }
}
