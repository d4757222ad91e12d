//! FAQ corpus: canned question/answer entries grouped by category.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{SupportError, SupportResult};

/// A single canned FAQ entry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FaqEntry {
    /// Canonical question text.
    pub question: String,
    /// Answer returned to the user.
    pub answer: String,
    /// Curated keywords, matched as literal substrings.
    #[serde(default)]
    pub keywords: Vec<String>,
    /// Weight applied to keyword coverage, in `[0, 1]`.
    #[serde(alias = "confidence")]
    pub base_confidence: f64,
}

impl FaqEntry {
    /// Build an entry from string slices.
    #[must_use]
    pub fn new(question: &str, answer: &str, keywords: &[&str], base_confidence: f64) -> Self {
        Self {
            question: question.to_string(),
            answer: answer.to_string(),
            keywords: keywords.iter().map(|k| (*k).to_string()).collect(),
            base_confidence,
        }
    }
}

/// A named group of FAQ entries.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FaqCategory {
    /// Category name (e.g. `billing`).
    pub name: String,
    /// Entries in search order.
    pub entries: Vec<FaqEntry>,
}

/// Immutable FAQ corpus, searched in category order then entry order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FaqCorpus {
    categories: Vec<FaqCategory>,
}

impl FaqCorpus {
    /// Build a corpus from categories after validating every entry.
    ///
    /// # Errors
    /// Returns an error if an entry is blank or its base confidence is out of range.
    pub fn new(categories: Vec<FaqCategory>) -> SupportResult<Self> {
        let corpus = Self { categories };
        corpus.validate()?;
        Ok(corpus)
    }

    /// Load a corpus from a JSON file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read, parsed, or validated.
    pub fn from_json_file(path: impl AsRef<Path>) -> SupportResult<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        let corpus: Self = serde_json::from_str(&raw)?;
        corpus.validate()?;
        tracing::info!(
            path = %path.as_ref().display(),
            entries = corpus.len(),
            "Loaded FAQ corpus"
        );
        Ok(corpus)
    }

    /// Categories in search order.
    #[must_use]
    pub fn categories(&self) -> &[FaqCategory] {
        &self.categories
    }

    /// Iterate over `(category, entry)` pairs in search order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FaqEntry)> {
        self.categories
            .iter()
            .flat_map(|c| c.entries.iter().map(move |e| (c.name.as_str(), e)))
    }

    /// Total number of entries across all categories.
    #[must_use]
    pub fn len(&self) -> usize {
        self.categories.iter().map(|c| c.entries.len()).sum()
    }

    /// Whether the corpus has no entries at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn validate(&self) -> SupportResult<()> {
        for (category, entry) in self.iter() {
            if entry.question.trim().is_empty() || entry.answer.trim().is_empty() {
                return Err(SupportError::InvalidConfig(format!(
                    "FAQ entry in category '{category}' has a blank question or answer"
                )));
            }
            if !(0.0..=1.0).contains(&entry.base_confidence) {
                return Err(SupportError::InvalidConfig(format!(
                    "FAQ entry '{}' has base confidence outside [0, 1]",
                    entry.question
                )));
            }
        }
        Ok(())
    }

    /// The built-in demo corpus.
    #[must_use]
    #[allow(clippy::too_many_lines)]
    pub fn builtin() -> Self {
        let category = |name: &str, entries: Vec<FaqEntry>| FaqCategory {
            name: name.to_string(),
            entries,
        };

        Self {
            categories: vec![
                category(
                    "billing",
                    vec![
                        FaqEntry::new(
                            "How do I update my payment method?",
                            "You can update your payment method by going to Account Settings > Billing > Payment Methods. Click 'Add Payment Method' or 'Update' next to your current method. We accept all major credit cards and PayPal.",
                            &["payment", "billing", "update", "credit card", "paypal"],
                            0.95,
                        ),
                        FaqEntry::new(
                            "What payment methods do you accept?",
                            "We accept Visa, Mastercard, American Express, Discover, and PayPal. For enterprise customers, we also support wire transfers and purchase orders.",
                            &["payment methods", "credit card", "paypal", "wire transfer"],
                            0.92,
                        ),
                        FaqEntry::new(
                            "When will I be charged?",
                            "You'll be charged on your billing date each month. You can find your next billing date in Account Settings > Billing. We'll send you an email receipt after each charge.",
                            &["billing date", "charged", "when", "monthly"],
                            0.90,
                        ),
                        FaqEntry::new(
                            "How do I cancel my subscription?",
                            "To cancel your subscription, go to Account Settings > Billing > Subscription and click 'Cancel Subscription'. Your access will continue until your current billing period ends.",
                            &["cancel", "subscription", "unsubscribe"],
                            0.95,
                        ),
                        FaqEntry::new(
                            "Can I get a refund?",
                            "We offer a 30-day money-back guarantee for new customers. For existing customers, refunds are considered on a case-by-case basis. Please contact our billing team for assistance.",
                            &["refund", "money back", "guarantee"],
                            0.88,
                        ),
                    ],
                ),
                category(
                    "technical",
                    vec![
                        FaqEntry::new(
                            "How do I reset my password?",
                            "To reset your password, click 'Forgot Password' on the login page. Enter your email address and we'll send you a reset link. The link expires in 24 hours for security.",
                            &["password", "reset", "forgot", "login"],
                            0.98,
                        ),
                        FaqEntry::new(
                            "Why can't I log in?",
                            "If you can't log in, try these steps: 1) Check your email and password are correct, 2) Clear your browser cache, 3) Try incognito mode, 4) Reset your password if needed. Contact support if issues persist.",
                            &["login", "can't log in", "access", "sign in"],
                            0.92,
                        ),
                        FaqEntry::new(
                            "How do I update my account information?",
                            "Go to Account Settings > Profile to update your name, email, phone number, and other personal information. Some changes may require email verification.",
                            &["account", "profile", "update", "personal information"],
                            0.89,
                        ),
                        FaqEntry::new(
                            "The app is running slowly, what should I do?",
                            "Try these steps to improve performance: 1) Close other browser tabs, 2) Clear your browser cache, 3) Check your internet connection, 4) Try a different browser, 5) Restart your device. Contact support if problems continue.",
                            &["slow", "performance", "loading", "lag"],
                            0.85,
                        ),
                        FaqEntry::new(
                            "How do I export my data?",
                            "You can export your data from Account Settings > Data & Privacy > Export Data. Choose your preferred format (CSV, JSON, PDF) and we'll email you a download link within 24 hours.",
                            &["export", "data", "download", "backup"],
                            0.91,
                        ),
                    ],
                ),
                category(
                    "products",
                    vec![
                        FaqEntry::new(
                            "What features are included in each plan?",
                            "Basic Plan includes core features for up to 5 users. Pro Plan adds advanced analytics and 50 users. Enterprise Plan includes everything plus custom integrations, dedicated support, and unlimited users. Visit our pricing page for full details.",
                            &["features", "plans", "pricing", "basic", "pro", "enterprise"],
                            0.93,
                        ),
                        FaqEntry::new(
                            "How do I upgrade my account?",
                            "To upgrade your account, go to Account Settings > Billing > Subscription and click 'Upgrade Plan'. Choose your new plan and confirm payment details. The upgrade takes effect immediately.",
                            &["upgrade", "plan", "account", "subscription"],
                            0.95,
                        ),
                        FaqEntry::new(
                            "Do you offer enterprise solutions?",
                            "Yes, we offer Enterprise plans with custom pricing, dedicated support, advanced security features, and API access. Contact our sales team for a personalized quote and demo.",
                            &["enterprise", "business", "custom", "sales"],
                            0.90,
                        ),
                        FaqEntry::new(
                            "What's the difference between plans?",
                            "Basic ($9/mo): 5 users, core features. Pro ($29/mo): 50 users, analytics, integrations. Enterprise (custom): unlimited users, white-label, dedicated support, SLA. All plans include 24/7 support.",
                            &["difference", "plans", "comparison", "pricing"],
                            0.87,
                        ),
                    ],
                ),
                category(
                    "account",
                    vec![
                        FaqEntry::new(
                            "How do I delete my account?",
                            "To delete your account, go to Account Settings > Data & Privacy > Delete Account. This action is permanent and will remove all your data. You can also contact support for assistance.",
                            &["delete", "account", "remove", "permanent"],
                            0.94,
                        ),
                        FaqEntry::new(
                            "How do I change my email address?",
                            "Go to Account Settings > Profile > Email Address. Enter your new email and click 'Update'. You'll need to verify the new email address before the change takes effect.",
                            &["email", "change", "update", "address"],
                            0.91,
                        ),
                        FaqEntry::new(
                            "Can I transfer my account to someone else?",
                            "Yes, account transfers are available for Pro and Enterprise customers. Contact our support team with both email addresses to initiate the transfer process. Basic plan users need to upgrade first.",
                            &["transfer", "account", "ownership", "someone else"],
                            0.82,
                        ),
                        FaqEntry::new(
                            "How do I view my usage statistics?",
                            "Your usage statistics are available in the Dashboard > Usage tab. You can see monthly usage, feature utilization, team activity, and billing information. Pro+ plans get detailed analytics.",
                            &["usage", "statistics", "dashboard", "analytics"],
                            0.89,
                        ),
                        FaqEntry::new(
                            "How do I enable two-factor authentication?",
                            "Enable 2FA in Account Settings > Security > Two-Factor Authentication. You can use SMS, email, or authenticator apps like Google Authenticator. We recommend using an authenticator app for better security.",
                            &["2fa", "two factor", "authentication", "security"],
                            0.96,
                        ),
                    ],
                ),
            ],
        }
    }
}

impl Default for FaqCorpus {
    fn default() -> Self {
        Self::builtin()
    }
}
