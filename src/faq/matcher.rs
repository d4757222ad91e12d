//! FAQ matching: exhaustive scoring of a message against the corpus.

use serde::Serialize;
use tracing::debug;

use crate::config::{MatchingConfig, ScoringStrategy};
use crate::error::{SupportError, SupportResult};
use crate::text::similarity;

use super::corpus::{FaqCorpus, FaqEntry};

/// Best FAQ match for a message.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct MatchResult<'a> {
    /// Heuristic match quality in `[0, 1]`.
    pub confidence: f64,
    /// Matched entry, if any entry scored above zero.
    pub faq: Option<&'a FaqEntry>,
    /// Category of the matched entry.
    pub category: Option<&'a str>,
}

impl MatchResult<'_> {
    /// A well-formed "nothing matched" result.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            confidence: 0.0,
            faq: None,
            category: None,
        }
    }

    /// Whether an entry was matched.
    #[must_use]
    pub const fn is_match(&self) -> bool {
        self.faq.is_some()
    }
}

/// Scores messages against FAQ entries.
#[derive(Clone, Debug)]
pub struct FaqMatcher {
    strategy: ScoringStrategy,
    title_prefix_chars: usize,
    title_bonus: f64,
}

impl FaqMatcher {
    /// Create a matcher from configuration.
    #[must_use]
    pub const fn new(config: &MatchingConfig) -> Self {
        Self {
            strategy: config.strategy,
            title_prefix_chars: config.title_prefix_chars,
            title_bonus: config.title_bonus,
        }
    }

    /// Active scoring strategy.
    #[must_use]
    pub const fn strategy(&self) -> ScoringStrategy {
        self.strategy
    }

    /// Find the best-scoring entry across every category.
    ///
    /// `message` is expected to be normalized (lowercased and trimmed).
    /// A strictly greater score replaces the incumbent, so ties keep the
    /// entry found first.
    ///
    /// # Errors
    /// Returns [`SupportError::EmptyCorpus`] if the corpus has no entries.
    pub fn find_best_match<'a>(
        &self,
        message: &str,
        corpus: &'a FaqCorpus,
    ) -> SupportResult<MatchResult<'a>> {
        if corpus.is_empty() {
            return Err(SupportError::EmptyCorpus);
        }

        let mut best = MatchResult::none();
        for (category, faq) in corpus.iter() {
            let confidence = self.score(message, faq);
            if confidence > best.confidence {
                best = MatchResult {
                    confidence,
                    faq: Some(faq),
                    category: Some(category),
                };
            }
        }

        debug!(
            strategy = ?self.strategy,
            confidence = best.confidence,
            category = best.category.unwrap_or("none"),
            "FAQ lookup complete"
        );
        Ok(best)
    }

    /// Score one entry with the configured strategy.
    #[must_use]
    pub fn score(&self, message: &str, faq: &FaqEntry) -> f64 {
        match self.strategy {
            ScoringStrategy::KeywordOverlap => self.keyword_overlap(message, faq),
            ScoringStrategy::Jaccard => jaccard_score(message, faq),
        }
    }

    #[allow(clippy::cast_precision_loss)]
    fn keyword_overlap(&self, message: &str, faq: &FaqEntry) -> f64 {
        if faq.keywords.is_empty() {
            return 0.0;
        }

        let hits = faq
            .keywords
            .iter()
            .filter(|keyword| message.contains(keyword.to_lowercase().as_str()))
            .count();
        if hits == 0 {
            return 0.0;
        }

        let mut confidence = (hits as f64 / faq.keywords.len() as f64) * faq.base_confidence;

        let prefix: String = faq
            .question
            .to_lowercase()
            .chars()
            .take(self.title_prefix_chars)
            .collect();
        if message.contains(prefix.as_str()) {
            confidence += self.title_bonus;
        }

        confidence.min(1.0)
    }
}

impl Default for FaqMatcher {
    fn default() -> Self {
        Self::new(&MatchingConfig::default())
    }
}

fn jaccard_score(message: &str, faq: &FaqEntry) -> f64 {
    let reference = format!("{} {}", faq.question, faq.keywords.join(" "));
    similarity(message, &reference)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::faq::corpus::FaqCategory;

    fn jaccard_matcher() -> FaqMatcher {
        FaqMatcher::new(&MatchingConfig {
            strategy: ScoringStrategy::Jaccard,
            ..MatchingConfig::default()
        })
    }

    #[test]
    fn test_full_keyword_coverage_is_high_confidence() {
        let corpus = FaqCorpus::builtin();
        let matcher = FaqMatcher::default();
        let result = matcher
            .find_best_match("i forgot my password, need a reset for login", &corpus)
            .ok();
        let result = result.unwrap_or_else(MatchResult::none);
        assert!(result.confidence > 0.8);
        assert_eq!(result.category, Some("technical"));
        assert_eq!(
            result.faq.map(|f| f.question.as_str()),
            Some("How do I reset my password?")
        );
    }

    #[test]
    fn test_partial_coverage_scales_with_base_confidence() {
        let faq = FaqEntry::new("Can I get a refund?", "Yes.", &["refund", "money back", "guarantee"], 0.9);
        let score = FaqMatcher::default().score("i want a refund", &faq);
        assert!((score - 0.3).abs() < 1e-9);
    }

    #[test]
    fn test_question_prefix_bonus_is_clamped() {
        let faq = FaqEntry::new(
            "How do I reset my password?",
            "Click forgot password.",
            &["password", "reset"],
            0.98,
        );
        let score = FaqMatcher::default().score("how do i reset my password?", &faq);
        assert!((score - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_prefix_bonus_needs_a_keyword_hit() {
        let faq = FaqEntry::new("How do I reset my password?", "A.", &["zzz"], 0.9);
        let score = FaqMatcher::default().score("how do i reset my password?", &faq);
        assert!(score.abs() < f64::EPSILON);
    }

    #[test]
    fn test_no_overlap_returns_empty_result() {
        let corpus = FaqCorpus::builtin();
        for matcher in [FaqMatcher::default(), jaccard_matcher()] {
            let result = matcher
                .find_best_match("xylophone quartet rehearsal", &corpus)
                .ok();
            assert_eq!(result, Some(MatchResult::none()));
        }
    }

    #[test]
    fn test_ties_keep_first_entry() {
        let entries = vec![
            FaqEntry::new("First question here", "first", &["widget"], 0.9),
            FaqEntry::new("Second question here", "second", &["widget"], 0.9),
        ];
        let corpus = FaqCorpus::new(vec![FaqCategory {
            name: "products".to_string(),
            entries,
        }]);
        let corpus = corpus.unwrap_or_default();
        let result = FaqMatcher::default().find_best_match("my widget broke", &corpus).ok();
        assert_eq!(result.and_then(|r| r.faq).map(|f| f.answer.as_str()), Some("first"));
    }

    #[test]
    fn test_searches_all_categories() {
        let corpus = FaqCorpus::builtin();
        let result = FaqMatcher::default()
            .find_best_match("how do i enable two factor authentication for security", &corpus)
            .ok();
        assert_eq!(result.and_then(|r| r.category), Some("account"));
    }

    #[test]
    fn test_jaccard_strategy() {
        let corpus = FaqCorpus::builtin();
        let result = jaccard_matcher()
            .find_best_match("cancel subscription unsubscribe", &corpus)
            .ok();
        let result = result.unwrap_or_else(MatchResult::none);
        assert_eq!(
            result.faq.map(|f| f.question.as_str()),
            Some("How do I cancel my subscription?")
        );
        assert!(result.confidence > 0.0 && result.confidence <= 1.0);
    }

    #[test]
    fn test_empty_corpus_is_an_error() {
        let empty = FaqCorpus::new(vec![FaqCategory {
            name: "billing".to_string(),
            entries: Vec::new(),
        }])
        .ok();
        let result = empty
            .as_ref()
            .map(|c| FaqMatcher::default().find_best_match("refund", c));
        assert!(matches!(result, Some(Err(SupportError::EmptyCorpus))));
    }
}
