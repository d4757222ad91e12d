//! Identifier types for sessions and escalations.
//!
//! Session ids are opaque strings: the widget may fall back to ids it made
//! up itself while offline, so any non-blank string is accepted. Ids minted
//! here look like `session-<uuid>`.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::SupportError;

/// Conversation session identifier.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    /// Mint a fresh, unique session id.
    #[must_use]
    pub fn generate() -> Self {
        Self(format!("session-{}", Uuid::new_v4().simple()))
    }

    /// Borrow the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for SessionId {
    type Err = SupportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(SupportError::InvalidRequest(
                "session id must not be blank".to_string(),
            ));
        }
        Ok(Self(trimmed.to_string()))
    }
}

impl AsRef<str> for SessionId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Identifier of a simulated escalation ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EscalationId(pub Uuid);

impl EscalationId {
    /// Create a new random identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for EscalationId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EscalationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "esc-{}", self.0.simple())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_ids_are_unique() {
        let a = SessionId::generate();
        let b = SessionId::generate();
        assert_ne!(a, b);
        assert!(a.as_str().starts_with("session-"));
    }

    #[test]
    fn test_parse_trims_and_rejects_blank() {
        let parsed: Result<SessionId, _> = " session-local-1 ".parse();
        assert_eq!(parsed.ok().map(|id| id.to_string()), Some("session-local-1".to_string()));
        assert!("   ".parse::<SessionId>().is_err());
    }

    #[test]
    fn test_escalation_id_display() {
        let id = EscalationId::new();
        assert!(id.to_string().starts_with("esc-"));
    }

    #[test]
    fn test_session_id_serializes_as_string() {
        let id: Option<SessionId> = "session-abc".parse().ok();
        let json = id.and_then(|id| serde_json::to_string(&id).ok());
        assert_eq!(json.as_deref(), Some("\"session-abc\""));
    }
}
