use std::time::Duration;

use thiserror::Error;

/// Error taxonomy of the screening engine.
///
/// Job-level variants (`InsufficientSpecification`, `Configuration`) abort a batch
/// before any candidate work starts. Candidate-level variants (`ExtractionFailure`,
/// `ExtractionTimeout`) are converted into failed records at the pipeline boundary.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScreeningError {
    #[error("insufficient specification: {0}")]
    InsufficientSpecification(String),

    #[error("extraction failed: {0}")]
    ExtractionFailure(String),

    #[error("extraction timed out after {}s", .0.as_secs_f64())]
    ExtractionTimeout(Duration),

    #[error("configuration error: {0}")]
    Configuration(String),
}

impl ScreeningError {
    /// Maps a backend error raised while extracting job requirements.
    pub fn from_job_extraction(err: ExtractionError) -> Self {
        match err {
            ExtractionError::Empty => ScreeningError::InsufficientSpecification(
                "job description is empty".to_string(),
            ),
            ExtractionError::Insufficient(reason) => {
                ScreeningError::InsufficientSpecification(reason)
            }
            other => ScreeningError::ExtractionFailure(other.to_string()),
        }
    }

    /// Maps a backend error raised while extracting a candidate profile.
    pub fn from_candidate_extraction(err: ExtractionError) -> Self {
        ScreeningError::ExtractionFailure(err.to_string())
    }
}

/// Error reported by an extraction backend.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExtractionError {
    #[error("input text is empty")]
    Empty,

    #[error("{0}")]
    Insufficient(String),

    #[error("malformed extraction output: {0}")]
    Malformed(String),

    #[error("transient extraction error: {0}")]
    Transient(String),

    /// Non-retryable backend failure unrelated to the input (auth, bad request).
    #[error("extraction backend error: {0}")]
    Backend(String),
}

impl ExtractionError {
    /// Only transient errors are worth another attempt.
    pub fn is_transient(&self) -> bool {
        matches!(self, ExtractionError::Transient(_))
    }
}
