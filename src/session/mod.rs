//! Conversation sessions: identifiers, message log, and the session registry.

pub mod ids;
pub mod store;
pub mod types;

pub use ids::{EscalationId, SessionId};
pub use store::SessionStore;
pub use types::{ChatMessage, ConversationSession, Role, SessionStatus};
