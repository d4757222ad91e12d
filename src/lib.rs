//! Customer-support chat backend.
//!
//! Answers user messages from an FAQ knowledge base, detects when a
//! conversation should be handed to a human agent, and exposes the whole
//! flow over HTTP together with per-session summaries and dashboard metrics.

#![deny(unsafe_code)]
#![deny(unused_must_use)]
#![deny(nonstandard_style)]
#![forbid(unsafe_op_in_unsafe_fn)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::print_stdout)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
#![deny(clippy::unwrap_in_result)]
#![deny(overflowing_literals)]

/// Dashboard metrics and session summaries.
pub mod analytics;
/// Tunable thresholds, phrase lists and categories.
pub mod config;
/// Library error type.
pub mod error;
/// Human-handoff detection.
pub mod escalation;
/// FAQ knowledge base and matching.
pub mod faq;
/// Per-message response state machine.
pub mod pipeline;
/// HTTP server and API routes.
#[allow(clippy::missing_errors_doc, clippy::unused_async)]
pub mod server;
/// Conversation sessions and their store.
pub mod session;
/// Entry helpers to start the support bot.
pub mod start_support_bot;
/// Keyword extraction, similarity and sentiment.
pub mod text;

pub use config::{ScoringStrategy, SupportConfig};
pub use error::{SupportError, SupportResult};
pub use escalation::{EscalationDecision, EscalationPolicy, EscalationReason};
pub use faq::{FaqCorpus, FaqEntry, FaqMatcher, MatchResult};
pub use pipeline::{PipelineOutcome, PipelineState, ResponsePipeline};
pub use session::{ConversationSession, SessionId, SessionStore};
