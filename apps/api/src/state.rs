use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::CompletionBackend;
use crate::session::SessionStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Completion transport. `LlmClient` in production; swapped for a scripted backend in tests.
    pub llm: Arc<dyn CompletionBackend>,
    pub sessions: SessionStore,
    pub config: Config,
}

#[cfg(test)]
pub(crate) fn test_state(llm: Arc<dyn CompletionBackend>) -> AppState {
    AppState {
        llm,
        sessions: SessionStore::new(),
        config: crate::config::test_config(),
    }
}
