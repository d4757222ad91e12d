//! Aggregate analytics over all live sessions.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use crate::config::{AnalyticsConfig, QueryCategory, SupportConfig};
use crate::session::{ConversationSession, Role};
use crate::text::SentimentScorer;

use super::summary::{SessionSummary, summarize_session};

/// Bucket name for messages that match no category.
pub const OTHER_CATEGORY: &str = "Other";

/// Number of hourly buckets in the session time series.
pub const TIME_SERIES_BUCKETS: i64 = 24;

/// Number of user messages that fell into a query category.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    /// Category name.
    pub name: String,
    /// Number of user messages.
    pub count: usize,
}

/// Sessions started within one hour.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TimeBucket {
    /// Exclusive start of the hour.
    pub start: DateTime<Utc>,
    /// Sessions created in `(start, start + 1h]`.
    pub count: usize,
}

/// Dashboard metrics.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsSnapshot {
    /// Registered sessions.
    pub total_sessions: usize,
    /// Sessions handed to a human.
    pub escalated_sessions: usize,
    /// `escalated_sessions / total_sessions`, 0 when there are none.
    pub escalation_rate: f64,
    /// Messages across all sessions.
    pub total_messages: usize,
    /// Mean messages per session.
    pub avg_messages_per_session: f64,
    /// Mean time from creation to last activity.
    pub avg_session_seconds: f64,
    /// User messages per query category.
    pub query_categories: Vec<CategoryCount>,
    /// Session starts per hour over the last day.
    pub sessions_per_hour: Vec<TimeBucket>,
}

/// Computes summaries and dashboard metrics.
#[derive(Clone, Debug)]
pub struct Analytics {
    config: AnalyticsConfig,
    scorer: SentimentScorer,
}

impl Analytics {
    /// Create from the shared configuration.
    #[must_use]
    pub fn new(config: &SupportConfig) -> Self {
        Self {
            config: config.analytics.clone(),
            scorer: SentimentScorer::new(&config.sentiment),
        }
    }

    /// Summarize one session.
    #[must_use]
    pub fn summarize(&self, session: &ConversationSession) -> SessionSummary {
        summarize_session(session, &self.scorer, self.config.top_topics)
    }

    /// Compute dashboard metrics over `sessions` as of `now`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn snapshot(
        &self,
        sessions: &[ConversationSession],
        now: DateTime<Utc>,
    ) -> AnalyticsSnapshot {
        let total_sessions = sessions.len();
        let escalated_sessions = sessions.iter().filter(|s| s.is_escalated()).count();
        let total_messages: usize = sessions.iter().map(ConversationSession::len).sum();

        let (escalation_rate, avg_messages_per_session, avg_session_seconds) =
            if total_sessions == 0 {
                (0.0, 0.0, 0.0)
            } else {
                let n = total_sessions as f64;
                let seconds: i64 = sessions
                    .iter()
                    .map(|s| (s.last_activity - s.created_at).num_seconds())
                    .sum();
                (
                    escalated_sessions as f64 / n,
                    total_messages as f64 / n,
                    seconds as f64 / n,
                )
            };

        let user_texts = sessions
            .iter()
            .flat_map(|s| s.messages().iter())
            .filter(|m| m.role == Role::User)
            .map(|m| m.content.as_str());

        AnalyticsSnapshot {
            total_sessions,
            escalated_sessions,
            escalation_rate,
            total_messages,
            avg_messages_per_session,
            avg_session_seconds,
            query_categories: categorize_queries(user_texts, &self.config.query_categories),
            sessions_per_hour: hourly_session_counts(sessions, now),
        }
    }
}

/// Count texts per category; each text goes to the first category with a keyword hit.
///
/// The result lists categories in configuration order followed by
/// [`OTHER_CATEGORY`].
#[must_use]
pub fn categorize_queries<'a, I>(texts: I, categories: &[QueryCategory]) -> Vec<CategoryCount>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut counts = vec![0usize; categories.len() + 1];
    for text in texts {
        let lowered = text.to_lowercase();
        let slot = categories
            .iter()
            .position(|c| c.keywords.iter().any(|k| lowered.contains(k.as_str())))
            .unwrap_or(categories.len());
        counts[slot] += 1;
    }

    categories
        .iter()
        .map(|c| c.name.clone())
        .chain(std::iter::once(OTHER_CATEGORY.to_string()))
        .zip(counts)
        .map(|(name, count)| CategoryCount { name, count })
        .collect()
}

/// Sessions created per hour, oldest bucket first.
///
/// Buckets are `(start, start + 1h]`; the newest one ends at `now`.
#[must_use]
pub fn hourly_session_counts(
    sessions: &[ConversationSession],
    now: DateTime<Utc>,
) -> Vec<TimeBucket> {
    (0..TIME_SERIES_BUCKETS)
        .rev()
        .map(|hours_ago| {
            let end = now - Duration::hours(hours_ago);
            let start = end - Duration::hours(1);
            let count = sessions
                .iter()
                .filter(|s| s.created_at > start && s.created_at <= end)
                .count();
            TimeBucket { start, count }
        })
        .collect()
}
