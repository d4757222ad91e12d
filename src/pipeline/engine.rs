//! Response pipeline: escalation check, FAQ lookup, and reply generation.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info};

use crate::config::SupportConfig;
use crate::escalation::{EscalationPolicy, EscalationReason};
use crate::error::{SupportError, SupportResult};
use crate::faq::{FaqCorpus, FaqMatcher};
use crate::session::{ChatMessage, ConversationSession, Role, SessionId, SessionStore};
use crate::text::normalize_message;

use super::templates::{
    RandomSelector, TemplateSelector, clarify_reply, fallback_reply, high_confidence_reply,
};

/// States a message passes through while being answered.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineState {
    /// Message accepted and normalized.
    Received,
    /// Escalation triggers are being evaluated.
    EscalationCheck,
    /// A trigger fired; the canned escalation reply is returned.
    Escalated,
    /// The FAQ corpus is being searched.
    FaqLookup,
    /// Confident match; the answer is returned directly.
    HighConfidenceReply,
    /// Plausible match; the answer is returned with a request for detail.
    ClarifyReply,
    /// No usable match; a human is offered.
    FallbackReply,
    /// Terminal state.
    Done,
}

/// Result of answering one message.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineOutcome {
    /// Reply text for the user.
    pub content: String,
    /// Escalation suggested to the user, if any.
    pub escalation: Option<EscalationReason>,
    /// Reply state reached before `Done`.
    pub state: PipelineState,
    /// Match confidence, when the FAQ was consulted.
    pub confidence: Option<f64>,
    /// Category of the matched FAQ entry.
    pub category: Option<String>,
    /// Every state visited, in order.
    pub trace: Vec<PipelineState>,
}

/// Single message-answering pipeline shared by every transport.
pub struct ResponsePipeline {
    corpus: Arc<FaqCorpus>,
    matcher: FaqMatcher,
    policy: EscalationPolicy,
    high_confidence: f64,
    clarify_confidence: f64,
    selector: Box<dyn TemplateSelector>,
}

impl std::fmt::Debug for ResponsePipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResponsePipeline")
            .field("entries", &self.corpus.len())
            .field("strategy", &self.matcher.strategy())
            .field("high_confidence", &self.high_confidence)
            .field("clarify_confidence", &self.clarify_confidence)
            .finish_non_exhaustive()
    }
}

impl ResponsePipeline {
    /// Build a pipeline over `corpus` using random template selection.
    ///
    /// # Errors
    /// Returns an error if the configuration is invalid.
    pub fn new(config: &SupportConfig, corpus: Arc<FaqCorpus>) -> SupportResult<Self> {
        config.validate()?;
        Ok(Self {
            corpus,
            matcher: FaqMatcher::new(&config.matching),
            policy: EscalationPolicy::new(&config.escalation),
            high_confidence: config.matching.high_confidence,
            clarify_confidence: config.matching.clarify_confidence,
            selector: Box::new(RandomSelector),
        })
    }

    /// Replace the template selector.
    #[must_use]
    pub fn with_selector(mut self, selector: impl TemplateSelector + 'static) -> Self {
        self.selector = Box::new(selector);
        self
    }

    /// The corpus this pipeline answers from.
    #[must_use]
    pub fn corpus(&self) -> &FaqCorpus {
        &self.corpus
    }

    /// Answer `message` in the context of `session` without touching any store.
    ///
    /// The escalation policy always runs before the FAQ is consulted.
    ///
    /// # Errors
    /// Returns [`SupportError::EmptyCorpus`] if there is nothing to match against.
    pub fn process(
        &self,
        message: &str,
        session: &ConversationSession,
    ) -> SupportResult<PipelineOutcome> {
        let normalized = normalize_message(message);
        let mut trace = vec![PipelineState::Received, PipelineState::EscalationCheck];

        let decision = self.policy.evaluate(&normalized, session);
        if decision.should_escalate {
            trace.extend([PipelineState::Escalated, PipelineState::Done]);
            return Ok(PipelineOutcome {
                content: decision.response.unwrap_or_default(),
                escalation: decision.reason,
                state: PipelineState::Escalated,
                confidence: None,
                category: None,
                trace,
            });
        }

        trace.push(PipelineState::FaqLookup);
        let matched = self.matcher.find_best_match(&normalized, &self.corpus)?;

        let (state, content, escalation) = match matched.faq {
            Some(faq) if matched.confidence > self.high_confidence => (
                PipelineState::HighConfidenceReply,
                high_confidence_reply(self.selector.as_ref(), &faq.answer),
                None,
            ),
            Some(faq) if matched.confidence > self.clarify_confidence => (
                PipelineState::ClarifyReply,
                clarify_reply(&faq.question, &faq.answer),
                None,
            ),
            _ => (
                PipelineState::FallbackReply,
                fallback_reply(self.selector.as_ref()),
                Some(EscalationReason::LowConfidence),
            ),
        };

        trace.extend([state, PipelineState::Done]);
        debug!(?state, confidence = matched.confidence, "Reply selected");

        Ok(PipelineOutcome {
            content,
            escalation,
            state,
            confidence: Some(matched.confidence),
            category: matched.category.map(str::to_string),
            trace,
        })
    }

    /// Record a user message, answer it, and record the reply.
    ///
    /// Unknown session ids are registered on first use. A suggested
    /// escalation is kept on the session until the user confirms it.
    ///
    /// # Errors
    /// Returns an error if the message is blank or the pipeline fails.
    pub fn handle_turn(
        &self,
        store: &SessionStore,
        session_id: &SessionId,
        message: &str,
    ) -> SupportResult<PipelineOutcome> {
        if message.trim().is_empty() {
            return Err(SupportError::InvalidRequest(
                "message must not be blank".to_string(),
            ));
        }

        store.ensure(session_id);
        store.append(session_id, Role::User, message)?;

        let outcome = store
            .with_session(session_id, |session| self.process(message, session))
            .ok_or_else(|| SupportError::SessionNotFound(session_id.to_string()))??;

        store.with_session_mut(session_id, |session| {
            session.push(ChatMessage::now(Role::Assistant, outcome.content.clone()));
            if outcome.escalation.is_some() {
                session.pending_escalation = outcome.escalation;
            }
        });

        info!(
            session_id = %session_id,
            state = ?outcome.state,
            escalation = outcome.escalation.map_or("none", EscalationReason::as_str),
            "Message answered"
        );
        Ok(outcome)
    }
}
