use std::sync::Arc;

use crate::llm_client::TextGenerator;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Pluggable generative backend. Default: `LlmClient`. Tests swap in canned generators.
    pub generator: Arc<dyn TextGenerator>,
}
