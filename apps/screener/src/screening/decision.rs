//! Decision Gate: score vs. caller-supplied threshold.
//!
//! There is no default threshold here; defaulting belongs to the caller.

use serde::Serialize;

use crate::screening::error::ScreeningError;
use crate::screening::models::{Decision, Evaluation, Verdict};
use crate::screening::scorer::MAX_SCORE;

/// A validated threshold: finite and within [0, 10].
#[derive(Debug, Clone, Copy, Serialize, PartialEq, PartialOrd)]
#[serde(transparent)]
pub struct Threshold(f64);

impl Threshold {
    /// Out-of-range values fail fast rather than being clamped.
    pub fn new(value: f64) -> Result<Self, ScreeningError> {
        if !value.is_finite() || !(0.0..=MAX_SCORE).contains(&value) {
            return Err(ScreeningError::Configuration(format!(
                "threshold must be a finite number within [0, {MAX_SCORE}], got {value}"
            )));
        }
        Ok(Self(value))
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl std::fmt::Display for Threshold {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.1}", self.0)
    }
}

/// Selected iff `score >= threshold`; the boundary selects.
pub fn decide(evaluation: Evaluation, threshold: Threshold) -> Decision {
    let verdict = if evaluation.score >= threshold.value() {
        Verdict::Selected
    } else {
        Verdict::Rejected
    };
    Decision {
        evaluation,
        threshold,
        verdict,
    }
}
