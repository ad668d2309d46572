//! Application state shared across all request handlers.

use std::sync::Arc;

use crate::config::AnswersConfig;
use crate::query::{Dispatcher, Registry};

/// Shared application state.
pub struct AppState {
    /// Dispatcher over the recognizers built at startup.
    pub dispatcher: Dispatcher,
    /// Configuration the service was started with.
    pub config: AnswersConfig,
}

impl AppState {
    /// Freeze `registry` and wrap it for the handlers.
    #[must_use]
    pub fn new(registry: Registry, config: AnswersConfig) -> Arc<Self> {
        Arc::new(Self {
            dispatcher: Dispatcher::new(Arc::new(registry)),
            config,
        })
    }
}
