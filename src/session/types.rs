//! Conversation session model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::escalation::EscalationReason;

use super::ids::SessionId;

/// Author of a chat message.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// End user of the widget.
    User,
    /// The support bot.
    Assistant,
}

impl Role {
    /// Stable string form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "user" => Ok(Self::User),
            "assistant" => Ok(Self::Assistant),
            _ => Err(value.to_string()),
        }
    }
}

/// A single chat message.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Author of the message.
    pub role: Role,
    /// Message text as sent or shown.
    pub content: String,
    /// Time the message was recorded.
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    /// Build a message stamped with the current time.
    #[must_use]
    pub fn now(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }
}

/// Lifecycle status of a session.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    /// Handled by the bot.
    #[default]
    Active,
    /// Handed over to a (simulated) human agent.
    Escalated,
}

/// An in-memory conversation: an append-only message log plus metadata.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationSession {
    /// Session identifier.
    pub id: SessionId,
    messages: Vec<ChatMessage>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Time of the most recent message.
    pub last_activity: DateTime<Utc>,
    /// Current status.
    pub status: SessionStatus,
    /// Escalation reason suggested by the bot and awaiting confirmation.
    pub pending_escalation: Option<EscalationReason>,
    /// Reason recorded when the session was escalated.
    pub escalation_reason: Option<String>,
}

impl ConversationSession {
    /// Start an empty session.
    #[must_use]
    pub fn new(id: SessionId) -> Self {
        let now = Utc::now();
        Self {
            id,
            messages: Vec::new(),
            created_at: now,
            last_activity: now,
            status: SessionStatus::Active,
            pending_escalation: None,
            escalation_reason: None,
        }
    }

    /// Append a message and bump `last_activity`.
    pub fn push(&mut self, message: ChatMessage) {
        if message.timestamp > self.last_activity {
            self.last_activity = message.timestamp;
        }
        self.messages.push(message);
    }

    /// All messages in arrival order.
    #[must_use]
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// The last `n` messages (fewer if the session is shorter).
    #[must_use]
    pub fn recent(&self, n: usize) -> &[ChatMessage] {
        let start = self.messages.len().saturating_sub(n);
        &self.messages[start..]
    }

    /// Number of messages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Whether no messages have been exchanged yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Mark the session as handed over to a human.
    pub fn mark_escalated(&mut self, reason: impl Into<String>) {
        self.status = SessionStatus::Escalated;
        self.escalation_reason = Some(reason.into());
        self.pending_escalation = None;
    }

    /// Whether the session has been escalated.
    #[must_use]
    pub fn is_escalated(&self) -> bool {
        self.status == SessionStatus::Escalated
    }
}
