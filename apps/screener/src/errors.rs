use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::screening::error::ScreeningError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error(transparent)]
    Screening(#[from] ScreeningError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Screening(e @ ScreeningError::Configuration(_)) => {
                (StatusCode::BAD_REQUEST, "CONFIGURATION_ERROR", e.to_string())
            }
            AppError::Screening(e @ ScreeningError::InsufficientSpecification(_)) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "INSUFFICIENT_SPECIFICATION",
                e.to_string(),
            ),
            AppError::Screening(e @ ScreeningError::ExtractionFailure(_)) => {
                tracing::error!("Job-level extraction failed: {e}");
                (
                    StatusCode::BAD_GATEWAY,
                    "EXTRACTION_FAILURE",
                    "Requirement extraction failed".to_string(),
                )
            }
            AppError::Screening(e @ ScreeningError::ExtractionTimeout(_)) => {
                tracing::error!("Job-level extraction timed out: {e}");
                (
                    StatusCode::GATEWAY_TIMEOUT,
                    "EXTRACTION_TIMEOUT",
                    e.to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
