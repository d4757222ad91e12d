//! Text helpers shared by matching, escalation and analytics.
//!
//! - `keywords`: normalization and stopword-filtered keyword sets
//! - `similarity`: Jaccard similarity over keyword sets
//! - `sentiment`: word-list sentiment scoring

pub mod keywords;
pub mod sentiment;
pub mod similarity;

pub use keywords::{STOPWORDS, extract_keywords, keyword_tokens, normalize_message};
pub use sentiment::{Sentiment, SentimentScore, SentimentScorer};
pub use similarity::{jaccard, similarity};
