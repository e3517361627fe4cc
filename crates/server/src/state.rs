use cyons_common::AppConfig;
use cyons_llm::Summarizer;
use std::sync::Arc;

/// Shared application state
pub struct AppState {
    /// Application configuration
    pub config: AppConfig,

    /// Controlled summarizer (client + manifestos)
    pub summarizer: Arc<Summarizer>,
}

impl AppState {
    /// Create new application state
    pub fn new(config: AppConfig, summarizer: Arc<Summarizer>) -> Self {
        Self { config, summarizer }
    }
}
