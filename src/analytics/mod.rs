//! Conversation analytics for the admin dashboard.

pub mod metrics;
pub mod summary;

pub use metrics::{Analytics, AnalyticsSnapshot, CategoryCount, TimeBucket, categorize_queries};
pub use summary::{SessionSummary, summarize_session};
