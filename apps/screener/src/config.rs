use std::time::Duration;

use anyhow::{bail, Context, Result};

use crate::screening::decision::Threshold;

/// Which extraction backend turns free text into requirements and profiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionBackend {
    /// Lexicon-driven, deterministic, no network.
    Keyword,
    /// Structured extraction through the Anthropic API.
    Llm,
}

impl std::str::FromStr for ExtractionBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "keyword" => Ok(ExtractionBackend::Keyword),
            "llm" => Ok(ExtractionBackend::Llm),
            other => bail!("EXTRACTION_BACKEND must be 'keyword' or 'llm', got '{other}'"),
        }
    }
}

/// Application configuration loaded from environment variables.
/// Startup fails if a value is present but invalid.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub extraction_backend: ExtractionBackend,
    pub anthropic_api_key: Option<String>,
    /// Caller-side default; the decision gate itself never defaults.
    pub default_threshold: Threshold,
    pub max_workers: usize,
    pub extraction_timeout: Duration,
    pub extraction_retries: u32,
    pub company_name: String,
    pub sender_name: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let extraction_backend: ExtractionBackend =
            env_or("EXTRACTION_BACKEND", "keyword").parse()?;
        let anthropic_api_key = std::env::var("ANTHROPIC_API_KEY")
            .ok()
            .filter(|k| !k.trim().is_empty());
        if extraction_backend == ExtractionBackend::Llm && anthropic_api_key.is_none() {
            bail!("ANTHROPIC_API_KEY is required when EXTRACTION_BACKEND=llm");
        }

        let default_threshold = env_or("DEFAULT_THRESHOLD", "5.0")
            .parse::<f64>()
            .context("DEFAULT_THRESHOLD must be a number")?;
        let default_threshold =
            Threshold::new(default_threshold).context("DEFAULT_THRESHOLD is out of range")?;

        let max_workers = env_or("MAX_WORKERS", "4")
            .parse::<usize>()
            .context("MAX_WORKERS must be a positive integer")?;
        if max_workers == 0 {
            bail!("MAX_WORKERS must be at least 1");
        }

        let timeout_secs = env_or("EXTRACTION_TIMEOUT_SECS", "30")
            .parse::<u64>()
            .context("EXTRACTION_TIMEOUT_SECS must be a positive integer")?;
        if timeout_secs == 0 {
            bail!("EXTRACTION_TIMEOUT_SECS must be at least 1");
        }

        Ok(Config {
            port: env_or("PORT", "8080")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: env_or("RUST_LOG", "info"),
            extraction_backend,
            anthropic_api_key,
            default_threshold,
            max_workers,
            extraction_timeout: Duration::from_secs(timeout_secs),
            extraction_retries: env_or("EXTRACTION_RETRIES", "2")
                .parse::<u32>()
                .context("EXTRACTION_RETRIES must be a non-negative integer")?,
            company_name: env_or("COMPANY_NAME", "Our Company"),
            sender_name: env_or("SENDER_NAME", "The Hiring Team"),
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
