//! Escalation policy: decides when a conversation should go to a human.
//!
//! Checks run in a fixed priority order and the first trigger wins:
//! explicit handoff request, negative sentiment, then repeated confusion
//! in the bot's own recent replies.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::EscalationConfig;
use crate::session::{ConversationSession, Role};

/// Why a conversation was flagged for a human agent.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EscalationReason {
    /// The user asked for a human.
    UserRequest,
    /// The user's message carries negative sentiment.
    NegativeSentiment,
    /// The bot has repeatedly failed to understand.
    RepeatedConfusion,
    /// No FAQ answer matched well enough.
    LowConfidence,
}

impl EscalationReason {
    /// Stable string form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::UserRequest => "user_request",
            Self::NegativeSentiment => "negative_sentiment",
            Self::RepeatedConfusion => "repeated_confusion",
            Self::LowConfidence => "low_confidence",
        }
    }

    /// Canned reply sent to the user when this trigger fires.
    #[must_use]
    pub const fn response(self) -> &'static str {
        match self {
            Self::UserRequest => {
                "I understand you'd like to speak with a human agent. Let me connect you with one of our customer service representatives who can provide personalized assistance."
            }
            Self::NegativeSentiment => {
                "I can see you're having a frustrating experience. Let me connect you with a human agent who can better assist you and resolve this issue."
            }
            Self::RepeatedConfusion => {
                "I apologize that I haven't been able to fully address your questions. Let me connect you with a human agent who can provide more detailed assistance."
            }
            Self::LowConfidence => {
                "I couldn't find a reliable answer to your question. A human agent can take a closer look and help you directly."
            }
        }
    }
}

impl fmt::Display for EscalationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EscalationReason {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "user_request" => Ok(Self::UserRequest),
            "negative_sentiment" => Ok(Self::NegativeSentiment),
            "repeated_confusion" => Ok(Self::RepeatedConfusion),
            "low_confidence" => Ok(Self::LowConfidence),
            _ => Err(value.to_string()),
        }
    }
}

/// Outcome of an escalation check.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EscalationDecision {
    /// Whether the conversation should be handed to a human.
    pub should_escalate: bool,
    /// Trigger that fired.
    pub reason: Option<EscalationReason>,
    /// Canned reply for the trigger.
    pub response: Option<String>,
}

impl EscalationDecision {
    /// A decision not to escalate.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            should_escalate: false,
            reason: None,
            response: None,
        }
    }

    /// A decision to escalate for `reason`, with its canned reply.
    #[must_use]
    pub fn escalate(reason: EscalationReason) -> Self {
        Self {
            should_escalate: true,
            reason: Some(reason),
            response: Some(reason.response().to_string()),
        }
    }
}

/// Evaluates escalation triggers for a message in its session context.
#[derive(Clone, Debug)]
pub struct EscalationPolicy {
    handoff_phrases: Vec<String>,
    negative_words: Vec<String>,
    confusion_markers: Vec<String>,
    confusion_window: usize,
    confusion_threshold: usize,
}

impl EscalationPolicy {
    /// Build a policy from the shared trigger configuration.
    #[must_use]
    pub fn new(escalation: &EscalationConfig) -> Self {
        let lowered =
            |items: &[String]| -> Vec<String> { items.iter().map(|s| s.to_lowercase()).collect() };
        Self {
            handoff_phrases: lowered(&escalation.handoff_phrases),
            negative_words: lowered(&escalation.negative_words),
            confusion_markers: lowered(&escalation.confusion_markers),
            confusion_window: escalation.confusion_window,
            confusion_threshold: escalation.confusion_threshold,
        }
    }

    /// Check `message` (normalized) and the session history for triggers.
    #[must_use]
    pub fn evaluate(&self, message: &str, session: &ConversationSession) -> EscalationDecision {
        let decision = if contains_any(message, &self.handoff_phrases) {
            EscalationDecision::escalate(EscalationReason::UserRequest)
        } else if contains_any(message, &self.negative_words) {
            EscalationDecision::escalate(EscalationReason::NegativeSentiment)
        } else if self.confusion_count(session) >= self.confusion_threshold {
            EscalationDecision::escalate(EscalationReason::RepeatedConfusion)
        } else {
            EscalationDecision::none()
        };

        if let Some(reason) = decision.reason {
            debug!(session_id = %session.id, %reason, "Escalation trigger fired");
        }
        decision
    }

    /// Confusion markers found in the bot's replies within the recent window.
    ///
    /// Each marker counts at most once per reply. Sessions shorter than the
    /// window are not inspected.
    #[must_use]
    pub fn confusion_count(&self, session: &ConversationSession) -> usize {
        if session.len() < self.confusion_window {
            return 0;
        }

        session
            .recent(self.confusion_window)
            .iter()
            .filter(|m| m.role == Role::Assistant)
            .map(|m| {
                let content = m.content.to_lowercase();
                self.confusion_markers
                    .iter()
                    .filter(|marker| content.contains(marker.as_str()))
                    .count()
            })
            .sum()
    }
}

impl Default for EscalationPolicy {
    fn default() -> Self {
        Self::new(&EscalationConfig::default())
    }
}

fn contains_any(message: &str, phrases: &[String]) -> bool {
    phrases.iter().any(|phrase| message.contains(phrase.as_str()))
}
