use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::store::SkillStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Postgres in production, an in-memory store in tests.
    pub store: Arc<dyn SkillStore>,
    /// `None` when no API key is configured.
    pub llm: Option<LlmClient>,
    pub config: Config,
}
