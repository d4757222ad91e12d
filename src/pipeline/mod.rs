//! Message-answering pipeline.
//!
//! - `engine`: the per-message state machine
//! - `templates`: reply wording and template selection

pub mod engine;
pub mod templates;

pub use engine::{PipelineOutcome, PipelineState, ResponsePipeline};
pub use templates::{FixedSelector, RandomSelector, TemplateSelector};
