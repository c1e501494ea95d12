use crate::config::Config;
use crate::screening::pipeline::Screener;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Extraction backends plus scoring, composing and pipeline policies.
    /// Backends are chosen at startup via EXTRACTION_BACKEND.
    pub screener: Screener,
}
