//! Escalation-to-human heuristics.

pub mod policy;

pub use policy::{EscalationDecision, EscalationPolicy, EscalationReason};
