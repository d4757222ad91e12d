//! Application state shared across all request handlers.

use std::path::PathBuf;
use std::sync::Arc;

use crate::analytics::Analytics;
use crate::config::SupportConfig;
use crate::error::SupportResult;
use crate::faq::FaqCorpus;
use crate::pipeline::ResponsePipeline;
use crate::session::SessionStore;

/// Default directory for the widget bundle.
pub const DEFAULT_STATIC_DIR: &str = "static";

/// Shared application state.
#[derive(Debug)]
pub struct AppState {
    /// Message-answering pipeline.
    pub pipeline: ResponsePipeline,
    /// Session registry owned by the transport layer.
    pub sessions: SessionStore,
    /// Dashboard analytics.
    pub analytics: Analytics,
    /// Directory served for non-API paths.
    pub static_dir: PathBuf,
}

impl AppState {
    /// Create application state from configuration and a corpus.
    ///
    /// # Errors
    /// Returns an error if the configuration is invalid.
    pub fn new(
        config: &SupportConfig,
        corpus: FaqCorpus,
        static_dir: impl Into<PathBuf>,
    ) -> SupportResult<Arc<Self>> {
        let pipeline = ResponsePipeline::new(config, Arc::new(corpus))?;
        Ok(Self::with_pipeline(config, pipeline, static_dir))
    }

    /// Create state around an existing pipeline (e.g. one with a fixed template selector).
    #[must_use]
    pub fn with_pipeline(
        config: &SupportConfig,
        pipeline: ResponsePipeline,
        static_dir: impl Into<PathBuf>,
    ) -> Arc<Self> {
        Arc::new(Self {
            pipeline,
            sessions: SessionStore::new(),
            analytics: Analytics::new(config),
            static_dir: static_dir.into(),
        })
    }
}
