//! Keyword extraction.

use std::collections::BTreeSet;

/// Minimum token length (in characters) kept as a keyword.
const MIN_KEYWORD_CHARS: usize = 3;

/// Common English words that carry no matching signal.
///
/// Tokens shorter than [`MIN_KEYWORD_CHARS`] are dropped before this list is
/// consulted, so two-letter words are not listed.
pub const STOPWORDS: &[&str] = &[
    "the", "and", "for", "but", "are", "you", "can", "how", "why", "who", "what", "when",
    "where", "with", "from", "all", "our", "not", "any", "has", "have", "had", "will", "was",
    "did", "get", "got", "lets", "your", "this", "that", "which", "their", "they", "them",
    "his", "her", "she", "its", "then", "than", "too", "also", "just", "now", "out", "down",
    "off", "over", "under", "again", "each", "per", "via", "etc",
];

/// Normalize a raw chat message for matching: lowercase and trim.
#[must_use]
pub fn normalize_message(text: &str) -> String {
    text.trim().to_lowercase()
}

/// Significant tokens of `text` in order, repeats included.
///
/// Lowercases, turns every character outside `[a-z0-9]` into a separator,
/// then drops short tokens and stopwords. No stemming is applied.
#[must_use]
pub fn keyword_tokens(text: &str) -> Vec<String> {
    let cleaned: String = text
        .to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { ' ' })
        .collect();

    cleaned
        .split_whitespace()
        .filter(|token| token.len() >= MIN_KEYWORD_CHARS)
        .filter(|token| !STOPWORDS.contains(token))
        .map(str::to_string)
        .collect()
}

/// Extract the set of significant keywords from `text`.
#[must_use]
pub fn extract_keywords(text: &str) -> BTreeSet<String> {
    keyword_tokens(text).into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_stopwords_and_punctuation() {
        let keywords = extract_keywords("I CAN'T login!!");
        assert!(keywords.contains("login"));
        assert!(!keywords.contains("can"));
        assert!(!keywords.contains("i"));
        assert!(!keywords.iter().any(|k| k.contains('!') || k.contains('\'')));
        assert_eq!(keywords.len(), 1);
    }

    #[test]
    fn test_collapses_duplicates() {
        let keywords = extract_keywords("refund refund REFUND please");
        assert_eq!(keywords.len(), 2);
        assert!(keywords.contains("refund"));
        assert!(keywords.contains("please"));
    }

    #[test]
    fn test_tokens_keep_repeats_in_order() {
        assert_eq!(
            keyword_tokens("Refund, refund the billing"),
            vec!["refund".to_string(), "refund".to_string(), "billing".to_string()]
        );
    }

    #[test]
    fn test_drops_short_tokens() {
        let keywords = extract_keywords("is my 2fa on");
        assert_eq!(keywords.into_iter().collect::<Vec<_>>(), vec!["2fa".to_string()]);
    }

    #[test]
    fn test_empty_input() {
        assert!(extract_keywords("").is_empty());
        assert!(extract_keywords("?!? ...").is_empty());
    }

    #[test]
    fn test_deterministic() {
        let text = "How do I update my payment method?";
        assert_eq!(extract_keywords(text), extract_keywords(text));
    }

    #[test]
    fn test_normalize_message() {
        assert_eq!(normalize_message("  Reset My PASSWORD \n"), "reset my password");
    }
}
