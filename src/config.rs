//! Configuration for the support bot.
//!
//! Trigger phrases, word lists and thresholds live here so that every
//! component reads the same versioned data. Defaults mirror the built-in
//! behaviour; a JSON file can override any subset of fields.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{SupportError, SupportResult};

/// Current configuration format version.
pub const CONFIG_VERSION: u32 = 1;

/// Top-level configuration for the support bot.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct SupportConfig {
    /// Configuration format version.
    pub version: u32,
    /// FAQ matching settings.
    pub matching: MatchingConfig,
    /// Escalation trigger settings.
    pub escalation: EscalationConfig,
    /// Sentiment word lists.
    pub sentiment: SentimentConfig,
    /// Analytics settings.
    pub analytics: AnalyticsConfig,
}

impl Default for SupportConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            matching: MatchingConfig::default(),
            escalation: EscalationConfig::default(),
            sentiment: SentimentConfig::default(),
            analytics: AnalyticsConfig::default(),
        }
    }
}

impl SupportConfig {
    /// Create a new config with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the FAQ scoring strategy.
    #[must_use]
    pub const fn with_strategy(mut self, strategy: ScoringStrategy) -> Self {
        self.matching.strategy = strategy;
        self
    }

    /// Load and validate a configuration from a JSON file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read, parsed, or fails validation.
    pub fn from_json_file(path: impl AsRef<Path>) -> SupportResult<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        let config: Self = serde_json::from_str(&raw)?;
        config.validate()?;
        tracing::info!(
            path = %path.as_ref().display(),
            version = config.version,
            "Loaded support configuration"
        );
        Ok(config)
    }

    /// Validate configuration invariants.
    ///
    /// # Errors
    /// Returns an error if any values are out of range or invalid.
    pub fn validate(&self) -> SupportResult<()> {
        if self.version == 0 || self.version > CONFIG_VERSION {
            return Err(SupportError::InvalidConfig(format!(
                "unsupported config version {} (expected 1..={CONFIG_VERSION})",
                self.version
            )));
        }

        let m = &self.matching;
        for (name, value) in [
            ("matching.high_confidence", m.high_confidence),
            ("matching.clarify_confidence", m.clarify_confidence),
            ("matching.title_bonus", m.title_bonus),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(SupportError::InvalidConfig(format!(
                    "{name} must be in [0, 1]"
                )));
            }
        }

        if m.clarify_confidence >= m.high_confidence {
            return Err(SupportError::InvalidConfig(
                "matching.clarify_confidence must be < matching.high_confidence".to_string(),
            ));
        }

        if m.title_prefix_chars == 0 {
            return Err(SupportError::InvalidConfig(
                "matching.title_prefix_chars must be > 0".to_string(),
            ));
        }

        let e = &self.escalation;
        if e.confusion_window == 0 {
            return Err(SupportError::InvalidConfig(
                "escalation.confusion_window must be > 0".to_string(),
            ));
        }

        if e.confusion_threshold == 0 {
            return Err(SupportError::InvalidConfig(
                "escalation.confusion_threshold must be > 0".to_string(),
            ));
        }

        for (name, list) in [
            ("escalation.handoff_phrases", &e.handoff_phrases),
            ("escalation.negative_words", &e.negative_words),
            ("escalation.confusion_markers", &e.confusion_markers),
            ("sentiment.negative_words", &self.sentiment.negative_words),
            ("sentiment.positive_words", &self.sentiment.positive_words),
        ] {
            if list.iter().any(|phrase| phrase.trim().is_empty()) {
                return Err(SupportError::InvalidConfig(format!(
                    "{name} must not contain blank entries"
                )));
            }
        }

        for category in &self.analytics.query_categories {
            if category.name.trim().is_empty() || category.keywords.is_empty() {
                return Err(SupportError::InvalidConfig(
                    "analytics.query_categories entries need a name and keywords".to_string(),
                ));
            }
        }

        Ok(())
    }
}

/// How FAQ entries are scored against a message.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoringStrategy {
    /// Curated keyword hits weighted by the entry's base confidence.
    #[default]
    KeywordOverlap,
    /// Jaccard similarity against the question and keywords.
    Jaccard,
}

/// FAQ matching settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchingConfig {
    /// Scoring strategy.
    pub strategy: ScoringStrategy,
    /// Confidence strictly above which the answer is returned directly.
    pub high_confidence: f64,
    /// Confidence strictly above which a clarifying answer is returned.
    pub clarify_confidence: f64,
    /// Number of leading question characters checked for a phrase match.
    pub title_prefix_chars: usize,
    /// Bonus added when the question prefix appears in the message.
    pub title_bonus: f64,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            strategy: ScoringStrategy::KeywordOverlap,
            high_confidence: 0.8,
            clarify_confidence: 0.5,
            title_prefix_chars: 20,
            title_bonus: 0.2,
        }
    }
}

/// Escalation trigger settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct EscalationConfig {
    /// Phrases that signal an explicit request for a human.
    pub handoff_phrases: Vec<String>,
    /// Words that signal the user is upset enough to hand over.
    pub negative_words: Vec<String>,
    /// Markers in assistant replies that indicate the bot was confused.
    pub confusion_markers: Vec<String>,
    /// Number of most recent messages inspected for confusion.
    pub confusion_window: usize,
    /// Marker count at which repeated confusion escalates.
    pub confusion_threshold: usize,
}

impl Default for EscalationConfig {
    fn default() -> Self {
        Self {
            handoff_phrases: to_strings(&[
                "human",
                "agent",
                "representative",
                "speak to someone",
                "talk to person",
                "customer service",
                "live chat",
                "help me",
                "frustrated",
                "angry",
                "complaint",
                "manager",
                "supervisor",
            ]),
            negative_words: to_strings(&[
                "terrible", "awful", "horrible", "worst", "hate", "stupid", "useless",
            ]),
            confusion_markers: to_strings(&["sorry", "i don't understand", "clarify", "unclear"]),
            confusion_window: 4,
            confusion_threshold: 2,
        }
    }
}

/// Sentiment word lists used for session summaries.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct SentimentConfig {
    /// Words that count towards a positive score.
    pub positive_words: Vec<String>,
    /// Words that count towards a negative score.
    pub negative_words: Vec<String>,
}

impl Default for SentimentConfig {
    fn default() -> Self {
        Self {
            positive_words: to_strings(&[
                "good",
                "great",
                "excellent",
                "awesome",
                "perfect",
                "love",
                "like",
                "happy",
                "satisfied",
                "amazing",
            ]),
            negative_words: to_strings(&[
                "bad",
                "terrible",
                "awful",
                "horrible",
                "worst",
                "hate",
                "angry",
                "frustrated",
                "disappointed",
                "useless",
            ]),
        }
    }
}

/// Keyword bucket used to categorise user queries.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryCategory {
    /// Display name.
    pub name: String,
    /// Substrings that place a message in this category.
    pub keywords: Vec<String>,
}

/// Analytics settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyticsConfig {
    /// Ordered query categories; the first match wins.
    pub query_categories: Vec<QueryCategory>,
    /// Number of topics reported in a session summary.
    pub top_topics: usize,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        let category = |name: &str, keywords: &[&str]| QueryCategory {
            name: name.to_string(),
            keywords: to_strings(keywords),
        };

        Self {
            query_categories: vec![
                category(
                    "Technical Support",
                    &["password", "login", "error", "bug", "slow", "not working"],
                ),
                category(
                    "Billing & Payments",
                    &["payment", "billing", "charge", "refund", "subscription"],
                ),
                category(
                    "Product Information",
                    &["features", "plans", "pricing", "upgrade", "enterprise"],
                ),
                category(
                    "Account Management",
                    &["account", "profile", "delete", "transfer", "2fa"],
                ),
            ],
            top_topics: 5,
        }
    }
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}
