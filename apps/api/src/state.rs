use std::sync::Arc;

use crate::artifacts::ArtifactStore;
use crate::layout::StyleSheets;
use crate::llm_client::CompletionService;
use crate::rate_limit::RateLimiter;
use crate::render::FontSource;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Model service. `LlmClient` in production, a stub in tests.
    pub llm: Arc<dyn CompletionService>,
    pub limiter: RateLimiter,
    pub artifacts: ArtifactStore,
    /// Per-kind stylesheets, resolved once at startup.
    pub styles: Arc<StyleSheets>,
    pub font: FontSource,
}
