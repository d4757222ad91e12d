//! Startup helpers for the support bot server.
//!
//! Reads its settings from the environment:
//! - `SUPPORT_BOT_CONFIG`: path to a JSON [`SupportConfig`] (defaults otherwise)
//! - `SUPPORT_BOT_FAQ_PATH`: path to a JSON FAQ corpus (built-in corpus otherwise)
//! - `SUPPORT_BOT_PORT`: listening port
//! - `SUPPORT_BOT_STATIC_DIR`: directory holding the widget bundle

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, bail};

use crate::config::SupportConfig;
use crate::faq::FaqCorpus;
use crate::server::{self, AppState, DEFAULT_STATIC_DIR};

/// Run the server until Ctrl-C.
///
/// # Returns
/// `ExitCode::SUCCESS` on graceful shutdown, `1` on failure.
#[must_use]
pub fn run() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    tracing::info!("Starting support bot v{}", env!("CARGO_PKG_VERSION"));

    let state = match initialize() {
        Ok(s) => s,
        Err(e) => {
            tracing::error!("Failed to create state: {e:#}");
            return ExitCode::from(1);
        }
    };

    let port = get_port();

    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            tracing::error!("Failed to create runtime: {e}");
            return ExitCode::from(1);
        }
    };

    if let Err(e) = rt.block_on(server::run_server_with_shutdown(state, port, shutdown_signal())) {
        tracing::error!("Server error: {e:#}");
        return ExitCode::from(1);
    }

    ExitCode::SUCCESS
}

/// Load configuration and corpus and build application state.
///
/// # Errors
/// Returns an error if a configured file cannot be loaded, the
/// configuration is invalid, or the corpus is empty.
pub fn initialize() -> anyhow::Result<Arc<AppState>> {
    let config = match std::env::var("SUPPORT_BOT_CONFIG") {
        Ok(path) => SupportConfig::from_json_file(&path)
            .with_context(|| format!("loading config from {path}"))?,
        Err(_) => SupportConfig::default(),
    };

    let corpus = match std::env::var("SUPPORT_BOT_FAQ_PATH") {
        Ok(path) => {
            FaqCorpus::from_json_file(&path).with_context(|| format!("loading FAQ from {path}"))?
        }
        Err(_) => FaqCorpus::builtin(),
    };
    if corpus.is_empty() {
        bail!("FAQ corpus has no entries");
    }
    tracing::info!(
        entries = corpus.len(),
        categories = corpus.categories().len(),
        strategy = ?config.matching.strategy,
        "FAQ corpus loaded"
    );

    let static_dir = get_static_dir();
    tracing::info!("Serving static files from {}", static_dir.display());

    Ok(AppState::new(&config, corpus, static_dir)?)
}

/// Get configured server port.
#[must_use]
pub fn get_port() -> u16 {
    std::env::var("SUPPORT_BOT_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(server::DEFAULT_PORT)
}

/// Get configured static directory.
#[must_use]
pub fn get_static_dir() -> PathBuf {
    std::env::var("SUPPORT_BOT_STATIC_DIR")
        .map_or_else(|_| PathBuf::from(DEFAULT_STATIC_DIR), PathBuf::from)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
