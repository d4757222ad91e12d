//! Word-list sentiment scoring.

use serde::{Deserialize, Serialize};

use crate::config::SentimentConfig;

/// Coarse sentiment label.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sentiment {
    /// More positive than negative words.
    Positive,
    /// Balanced or no sentiment words.
    Neutral,
    /// More negative than positive words.
    Negative,
}

/// Sentiment score for a piece of text.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentimentScore {
    /// Positive word hits minus negative word hits.
    pub score: i32,
    /// Label derived from the sign of `score`.
    pub sentiment: Sentiment,
}

impl SentimentScore {
    /// Build a score and derive its label.
    #[must_use]
    pub const fn from_score(score: i32) -> Self {
        let sentiment = if score > 0 {
            Sentiment::Positive
        } else if score < 0 {
            Sentiment::Negative
        } else {
            Sentiment::Neutral
        };
        Self { score, sentiment }
    }
}

/// Scores text against configured positive and negative word lists.
#[derive(Clone, Debug)]
pub struct SentimentScorer {
    positive: Vec<String>,
    negative: Vec<String>,
}

impl SentimentScorer {
    /// Create a scorer from configuration.
    #[must_use]
    pub fn new(config: &SentimentConfig) -> Self {
        Self {
            positive: config.positive_words.iter().map(|w| w.to_lowercase()).collect(),
            negative: config.negative_words.iter().map(|w| w.to_lowercase()).collect(),
        }
    }

    /// Score a single text, one point per word occurrence.
    #[must_use]
    pub fn score(&self, text: &str) -> SentimentScore {
        let lowered = text.to_lowercase();
        let score = lowered
            .split(|c: char| !c.is_alphanumeric())
            .filter(|word| !word.is_empty())
            .map(|word| {
                let mut delta = 0;
                if self.positive.iter().any(|p| p == word) {
                    delta += 1;
                }
                if self.negative.iter().any(|n| n == word) {
                    delta -= 1;
                }
                delta
            })
            .sum();
        SentimentScore::from_score(score)
    }

    /// Score several texts as one combined document.
    #[must_use]
    pub fn score_all<'a, I>(&self, texts: I) -> SentimentScore
    where
        I: IntoIterator<Item = &'a str>,
    {
        let total = texts.into_iter().map(|t| self.score(t).score).sum();
        SentimentScore::from_score(total)
    }
}

impl Default for SentimentScorer {
    fn default() -> Self {
        Self::new(&SentimentConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positive_text() {
        let scorer = SentimentScorer::default();
        let result = scorer.score("Great, that was an excellent answer!");
        assert_eq!(result.score, 2);
        assert_eq!(result.sentiment, Sentiment::Positive);
    }

    #[test]
    fn test_negative_text() {
        let scorer = SentimentScorer::default();
        let result = scorer.score("This is the worst, most useless app");
        assert_eq!(result.score, -2);
        assert_eq!(result.sentiment, Sentiment::Negative);
    }

    #[test]
    fn test_disappointment_is_negative() {
        let scorer = SentimentScorer::default();
        for text in ["this is bad", "i am so disappointed", "i am angry and frustrated"] {
            assert_eq!(scorer.score(text).sentiment, Sentiment::Negative, "{text}");
        }
        assert_eq!(scorer.score("i am angry and frustrated").score, -2);
    }

    #[test]
    fn test_neutral_text() {
        let scorer = SentimentScorer::default();
        let result = scorer.score("How do I export my data?");
        assert_eq!(result, SentimentScore::from_score(0));
        assert_eq!(result.sentiment, Sentiment::Neutral);
    }

    #[test]
    fn test_score_all_combines() {
        let scorer = SentimentScorer::default();
        let result = scorer.score_all(["awful", "great", "terrible"]);
        assert_eq!(result.score, -1);
    }
}
