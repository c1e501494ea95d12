mod config;
mod errors;
mod llm_client;
mod routes;
mod screening;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{Config, ExtractionBackend};
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::screening::composer::ComposerSettings;
use crate::screening::llm_extractor::{LlmProfileExtractor, LlmRequirementExtractor};
use crate::screening::pipeline::{PipelineSettings, Screener};
use crate::screening::profile::{KeywordProfileExtractor, ProfileExtractor};
use crate::screening::requirements::{
    KeywordRequirementExtractor, RequirementExtractor, WeightPolicy,
};
use crate::screening::scorer::ScoringPolicy;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails fast on invalid env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting screener v{}", env!("CARGO_PKG_VERSION"));

    let screener = build_screener(&config)?;

    let state = AppState {
        config: config.clone(),
        screener,
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Wires the configured extraction backend into a `Screener`.
fn build_screener(config: &Config) -> Result<Screener> {
    let weights = WeightPolicy::default();

    let (requirement_extractor, profile_extractor): (
        Arc<dyn RequirementExtractor>,
        Arc<dyn ProfileExtractor>,
    ) = match config.extraction_backend {
        ExtractionBackend::Keyword => (
            Arc::new(KeywordRequirementExtractor::new(weights)),
            Arc::new(KeywordProfileExtractor),
        ),
        ExtractionBackend::Llm => {
            let api_key = config
                .anthropic_api_key
                .clone()
                .context("ANTHROPIC_API_KEY is required when EXTRACTION_BACKEND=llm")?;
            let llm = LlmClient::new(api_key).context("Failed to build HTTP client")?;
            info!("LLM client initialized (model: {})", llm_client::MODEL);
            (
                Arc::new(LlmRequirementExtractor::new(llm.clone(), weights)),
                Arc::new(LlmProfileExtractor::new(llm)),
            )
        }
    };
    info!(
        backend = requirement_extractor.backend(),
        max_workers = config.max_workers,
        timeout_secs = config.extraction_timeout.as_secs(),
        retries = config.extraction_retries,
        "Extraction backend ready"
    );

    let composer = ComposerSettings {
        company_name: config.company_name.clone(),
        sender_name: config.sender_name.clone(),
        ..Default::default()
    };
    let settings = PipelineSettings {
        max_workers: config.max_workers,
        extraction_timeout: config.extraction_timeout,
        extraction_retries: config.extraction_retries,
        ..Default::default()
    };

    let screener = Screener::new(
        requirement_extractor,
        profile_extractor,
        ScoringPolicy::default(),
        composer,
        settings,
    )?;
    Ok(screener)
}
