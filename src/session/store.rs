//! In-memory session registry.

use dashmap::DashMap;
use tracing::debug;

use crate::error::{SupportError, SupportResult};

use super::ids::SessionId;
use super::types::{ChatMessage, ConversationSession, Role};

/// Thread-safe registry of conversation sessions.
///
/// Sessions live for the lifetime of the process; nothing is evicted.
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: DashMap<SessionId, ConversationSession>,
}

impl SessionStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mint a new id and start an empty session for it.
    pub fn create(&self) -> SessionId {
        let id = SessionId::generate();
        self.sessions
            .insert(id.clone(), ConversationSession::new(id.clone()));
        debug!(session_id = %id, "Session created");
        id
    }

    /// Start a session for `id` unless one exists. Returns `true` if created.
    pub fn ensure(&self, id: &SessionId) -> bool {
        if self.sessions.contains_key(id) {
            return false;
        }
        let mut created = false;
        self.sessions.entry(id.clone()).or_insert_with(|| {
            created = true;
            ConversationSession::new(id.clone())
        });
        if created {
            debug!(session_id = %id, "Session registered on first use");
        }
        created
    }

    /// Append a message to an existing session.
    ///
    /// # Errors
    /// Returns [`SupportError::SessionNotFound`] if `id` is unknown.
    pub fn append(&self, id: &SessionId, role: Role, content: impl Into<String>) -> SupportResult<()> {
        let mut session = self
            .sessions
            .get_mut(id)
            .ok_or_else(|| SupportError::SessionNotFound(id.to_string()))?;
        session.push(ChatMessage::now(role, content));
        Ok(())
    }

    /// Run `f` with shared access to a session.
    ///
    /// The map shard stays read-locked while `f` runs, so `f` must not call
    /// back into the store for the same id.
    pub fn with_session<R>(&self, id: &SessionId, f: impl FnOnce(&ConversationSession) -> R) -> Option<R> {
        self.sessions.get(id).map(|session| f(&session))
    }

    /// Run `f` with exclusive access to a session.
    pub fn with_session_mut<R>(
        &self,
        id: &SessionId,
        f: impl FnOnce(&mut ConversationSession) -> R,
    ) -> Option<R> {
        self.sessions.get_mut(id).map(|mut session| f(&mut session))
    }

    /// Clone of a session's message history, empty if unknown.
    #[must_use]
    pub fn history(&self, id: &SessionId) -> Vec<ChatMessage> {
        self.with_session(id, |s| s.messages().to_vec())
            .unwrap_or_default()
    }

    /// Clone of a whole session.
    #[must_use]
    pub fn snapshot(&self, id: &SessionId) -> Option<ConversationSession> {
        self.sessions.get(id).map(|s| s.value().clone())
    }

    /// Clone of every session, for reporting.
    #[must_use]
    pub fn snapshot_all(&self) -> Vec<ConversationSession> {
        self.sessions.iter().map(|entry| entry.value().clone()).collect()
    }

    /// Mark a session as escalated.
    ///
    /// # Errors
    /// Returns [`SupportError::SessionNotFound`] if `id` is unknown.
    pub fn mark_escalated(&self, id: &SessionId, reason: &str) -> SupportResult<()> {
        self.with_session_mut(id, |s| s.mark_escalated(reason))
            .ok_or_else(|| SupportError::SessionNotFound(id.to_string()))
    }

    /// Number of sessions currently escalated.
    #[must_use]
    pub fn escalated_count(&self) -> usize {
        self.sessions.iter().filter(|s| s.is_escalated()).count()
    }

    /// Number of registered sessions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Whether no sessions are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
