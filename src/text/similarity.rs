//! Jaccard similarity between texts.

use std::collections::BTreeSet;

use super::keywords::extract_keywords;

/// Jaccard coefficient of two token sets; 0.0 when both are empty.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn jaccard(a: &BTreeSet<String>, b: &BTreeSet<String>) -> f64 {
    let union = a.union(b).count();
    if union == 0 {
        return 0.0;
    }
    let intersection = a.intersection(b).count();
    intersection as f64 / union as f64
}

/// Similarity of two texts as the Jaccard coefficient of their keyword sets.
///
/// A coarse bag-of-words relevance score, symmetric in its arguments.
#[must_use]
pub fn similarity(text1: &str, text2: &str) -> f64 {
    jaccard(&extract_keywords(text1), &extract_keywords(text2))
}
