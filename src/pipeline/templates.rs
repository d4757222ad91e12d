//! Reply templates and template selection.

use rand::Rng;

/// Wrappers for a confidently matched answer. `{answer}` is substituted.
pub const HIGH_CONFIDENCE_TEMPLATES: [&str; 3] = [
    "{answer}\n\nIs there anything else I can help you with regarding this topic?",
    "Here's what I can tell you: {answer}\n\nWould you like more information about this?",
    "{answer}\n\nDoes this answer your question? Feel free to ask if you need clarification on any part.",
];

/// Reply for a plausible but uncertain match. `{question}` and `{answer}` are substituted.
pub const CLARIFY_TEMPLATE: &str = "I think you're asking about \"{question}\". {answer}\n\nIf this isn't what you were looking for, could you provide a bit more detail about what you need help with?";

/// Replies when nothing in the FAQ matched well enough.
pub const FALLBACK_TEMPLATES: [&str; 3] = [
    "I'm not entirely sure I understand your question. Could you please rephrase it or provide more details? Alternatively, I can connect you with a human agent who might be better able to assist you.",
    "I don't have a specific answer for that question in my knowledge base. Would you like me to connect you with a human customer service representative who can provide more detailed assistance?",
    "That's a great question, but I'd like to make sure I give you the most accurate information. Would you prefer to speak with one of our human agents who can provide personalized help?",
];

/// Picks one template out of a set.
pub trait TemplateSelector: Send + Sync {
    /// Return an index in `0..len`. `len` is never zero.
    fn select(&self, len: usize) -> usize;
}

/// Uniform random selection.
#[derive(Clone, Copy, Debug, Default)]
pub struct RandomSelector;

impl TemplateSelector for RandomSelector {
    fn select(&self, len: usize) -> usize {
        rand::thread_rng().gen_range(0..len)
    }
}

/// Always selects the same index (clamped to the set size).
#[derive(Clone, Copy, Debug, Default)]
pub struct FixedSelector(pub usize);

impl TemplateSelector for FixedSelector {
    fn select(&self, len: usize) -> usize {
        self.0.min(len.saturating_sub(1))
    }
}

/// Render a high-confidence reply.
#[must_use]
pub fn high_confidence_reply(selector: &dyn TemplateSelector, answer: &str) -> String {
    let template = HIGH_CONFIDENCE_TEMPLATES[selector.select(HIGH_CONFIDENCE_TEMPLATES.len())];
    template.replace("{answer}", answer)
}

/// Render a clarification reply.
#[must_use]
pub fn clarify_reply(question: &str, answer: &str) -> String {
    CLARIFY_TEMPLATE
        .replace("{question}", question)
        .replace("{answer}", answer)
}

/// Pick a fallback reply.
#[must_use]
pub fn fallback_reply(selector: &dyn TemplateSelector) -> String {
    FALLBACK_TEMPLATES[selector.select(FALLBACK_TEMPLATES.len())].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_selector_clamps() {
        assert_eq!(FixedSelector(1).select(3), 1);
        assert_eq!(FixedSelector(7).select(3), 2);
    }

    #[test]
    fn test_random_selector_in_range() {
        let selector = RandomSelector;
        for _ in 0..100 {
            assert!(selector.select(3) < 3);
        }
    }

    #[test]
    fn test_high_confidence_reply_wraps_answer() {
        let reply = high_confidence_reply(&FixedSelector(1), "Use the reset link.");
        assert!(reply.starts_with("Here's what I can tell you: Use the reset link."));
    }

    #[test]
    fn test_clarify_reply_restates_question() {
        let reply = clarify_reply("Can I get a refund?", "Within 30 days.");
        assert!(reply.contains("\"Can I get a refund?\""));
        assert!(reply.contains("Within 30 days."));
    }

    #[test]
    fn test_fallback_reply_is_from_set() {
        let reply = fallback_reply(&RandomSelector);
        assert!(FALLBACK_TEMPLATES.contains(&reply.as_str()));
    }
}
