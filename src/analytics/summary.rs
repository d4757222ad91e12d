//! Per-session summaries.

use std::collections::HashMap;

use serde::Serialize;

use crate::session::{ChatMessage, ConversationSession, Role, SessionId, SessionStatus};
use crate::text::{SentimentScore, SentimentScorer, keyword_tokens};

/// Summary of one conversation.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSummary {
    /// Session identifier.
    pub session_id: SessionId,
    /// Current status.
    pub status: SessionStatus,
    /// All messages.
    pub total_messages: usize,
    /// Messages written by the user.
    pub user_messages: usize,
    /// Replies from the bot.
    pub assistant_messages: usize,
    /// Mean delay between a user message and the reply right after it.
    pub avg_response_time_ms: i64,
    /// Most frequent user keywords.
    pub topics: Vec<String>,
    /// Time from creation to last activity.
    pub duration_seconds: i64,
    /// Combined sentiment of the user's messages.
    pub sentiment: SentimentScore,
    /// Recorded escalation reason, if escalated.
    pub escalation_reason: Option<String>,
}

/// Build a summary for `session`.
#[must_use]
pub fn summarize_session(
    session: &ConversationSession,
    scorer: &SentimentScorer,
    top_topics: usize,
) -> SessionSummary {
    let messages = session.messages();
    let user_messages: Vec<&ChatMessage> =
        messages.iter().filter(|m| m.role == Role::User).collect();

    SessionSummary {
        session_id: session.id.clone(),
        status: session.status,
        total_messages: messages.len(),
        user_messages: user_messages.len(),
        assistant_messages: messages.len() - user_messages.len(),
        avg_response_time_ms: avg_response_time_ms(messages),
        topics: top_keywords(user_messages.iter().map(|m| m.content.as_str()), top_topics),
        duration_seconds: (session.last_activity - session.created_at).num_seconds(),
        sentiment: scorer.score_all(user_messages.iter().map(|m| m.content.as_str())),
        escalation_reason: session.escalation_reason.clone(),
    }
}

/// Mean user-to-assistant reply delay in milliseconds, 0 when there are no replies.
#[must_use]
pub fn avg_response_time_ms(messages: &[ChatMessage]) -> i64 {
    let gaps: Vec<i64> = messages
        .windows(2)
        .filter(|pair| pair[0].role == Role::User && pair[1].role == Role::Assistant)
        .map(|pair| (pair[1].timestamp - pair[0].timestamp).num_milliseconds())
        .collect();

    if gaps.is_empty() {
        return 0;
    }
    let count = i64::try_from(gaps.len()).unwrap_or(i64::MAX);
    gaps.iter().sum::<i64>() / count
}

/// The `limit` most frequent keywords across `texts`, ties broken alphabetically.
///
/// Every occurrence counts, including repeats within one text.
#[must_use]
pub fn top_keywords<'a, I>(texts: I, limit: usize) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut frequency: HashMap<String, usize> = HashMap::new();
    for text in texts {
        for keyword in keyword_tokens(text) {
            *frequency.entry(keyword).or_insert(0) += 1;
        }
    }

    let mut ranked: Vec<(String, usize)> = frequency.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked.into_iter().take(limit).map(|(word, _)| word).collect()
}
