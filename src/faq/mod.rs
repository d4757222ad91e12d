//! FAQ corpus and matching.

pub mod corpus;
pub mod matcher;

pub use corpus::{FaqCategory, FaqCorpus, FaqEntry};
pub use matcher::{FaqMatcher, MatchResult};
