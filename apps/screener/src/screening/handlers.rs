//! Axum route handlers for the Screening API.

use axum::{extract::State, Json};
use serde::Deserialize;
use tracing::info;

use crate::errors::AppError;
use crate::screening::decision::Threshold;
use crate::screening::models::RequirementSet;
use crate::screening::pipeline::{BatchReport, CandidateInput};
use crate::state::AppState;

/// Upper bound on candidates accepted in one request.
pub const MAX_CANDIDATES_PER_BATCH: usize = 500;

// ────────────────────────────────────────────────────────────────────────────
// Request types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ExtractRequirementsRequest {
    pub job_description: String,
}

#[derive(Debug, Deserialize)]
pub struct ScreenRequest {
    pub job_description: String,
    /// Falls back to `DEFAULT_THRESHOLD` when omitted.
    #[serde(default)]
    pub threshold: Option<f64>,
    pub candidates: Vec<CandidateInput>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/screenings/requirements
///
/// Previews the requirement set extracted from a job description.
pub async fn handle_extract_requirements(
    State(state): State<AppState>,
    Json(request): Json<ExtractRequirementsRequest>,
) -> Result<Json<RequirementSet>, AppError> {
    let requirements = state
        .screener
        .extract_requirements(&request.job_description)
        .await?;
    Ok(Json(requirements))
}

/// POST /api/v1/screenings
///
/// Screens a batch of candidates against one job description. The threshold
/// is validated before any extraction work starts.
pub async fn handle_screen(
    State(state): State<AppState>,
    Json(request): Json<ScreenRequest>,
) -> Result<Json<BatchReport>, AppError> {
    let threshold = match request.threshold {
        Some(value) => Threshold::new(value)?,
        None => state.config.default_threshold,
    };

    if request.candidates.is_empty() {
        return Err(AppError::Validation(
            "candidates cannot be empty".to_string(),
        ));
    }
    if request.candidates.len() > MAX_CANDIDATES_PER_BATCH {
        return Err(AppError::Validation(format!(
            "at most {MAX_CANDIDATES_PER_BATCH} candidates per request, got {}",
            request.candidates.len()
        )));
    }

    info!(
        candidates = request.candidates.len(),
        %threshold,
        "Screening request received"
    );

    let report = state
        .screener
        .screen_batch(&request.job_description, threshold, request.candidates)
        .await?;

    Ok(Json(report))
}
