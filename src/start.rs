//! Startup helpers: logging, registry assembly, and the server entry.

use std::process::ExitCode;
use std::sync::Arc;

use thiserror::Error;

use crate::config::AnswersConfig;
use crate::query::{Registry, RegistryError};
use crate::server::{self, AppState};
use crate::visitors::{self, LookupError, VisitorLogClient, VisitorLogRecognizer, VisitorSource};

/// Failures while assembling the service.
#[derive(Debug, Error)]
pub enum StartupError {
    /// Two recognizers share a name.
    #[error(transparent)]
    Registry(#[from] RegistryError),
    /// A recognizer pattern did not compile.
    #[error("invalid recognizer pattern: {0}")]
    Pattern(#[from] regex::Error),
    /// The records client could not be built.
    #[error("records client: {0}")]
    Client(#[from] LookupError),
}

/// Install the `tracing` subscriber, honoring `RUST_LOG`.
pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .try_init();
}

/// Build the registry used in production, in precedence order.
///
/// # Errors
/// Returns an error if a recognizer cannot be built or a name repeats.
pub fn default_registry(
    source: Arc<dyn VisitorSource>,
    config: &AnswersConfig,
) -> Result<Registry, StartupError> {
    let mut registry = Registry::new();

    registry.register(
        visitors::RECOGNIZER_NAME,
        Arc::new(VisitorLogRecognizer::new(source)?.with_lookup_timeout(config.lookup_timeout)),
    )?;

    tracing::info!("Recognizers: {:?}", registry.names());
    Ok(registry)
}

/// Registry wired to the live visitor-log API.
///
/// # Errors
/// Returns an error if the client or a recognizer cannot be built.
pub fn live_registry(config: &AnswersConfig) -> Result<Registry, StartupError> {
    let client = VisitorLogClient::new(config)?;
    tracing::info!("Visitor log endpoint: {}", config.api_endpoint);
    default_registry(Arc::new(client), config)
}

/// Run the server (used by the `civic-query` binary).
///
/// # Returns
/// `ExitCode::SUCCESS` on graceful shutdown, `1` on failure.
#[must_use]
pub fn run() -> ExitCode {
    init_logging();

    tracing::info!("Starting civic-query v{}", env!("CARGO_PKG_VERSION"));

    let config = AnswersConfig::from_env();

    let state = match initialize(config) {
        Ok(s) => s,
        Err(e) => {
            tracing::error!("Failed to create state: {e}");
            return ExitCode::from(1);
        }
    };
    let port = state.config.port;

    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            tracing::error!("Failed to create runtime: {e}");
            return ExitCode::from(1);
        }
    };

    let shutdown = async {
        let _ = tokio::signal::ctrl_c().await;
        tracing::info!("Shutdown requested");
    };

    if let Err(e) = rt.block_on(server::run_server_with_shutdown(state, port, shutdown)) {
        tracing::error!("Server error: {e}");
        return ExitCode::from(1);
    }

    ExitCode::SUCCESS
}

/// Initialize application state without starting the server.
///
/// # Errors
/// Returns an error if state creation fails.
pub fn initialize(config: AnswersConfig) -> Result<Arc<AppState>, StartupError> {
    let registry = live_registry(&config)?;
    Ok(AppState::new(registry, config))
}
