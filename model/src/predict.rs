//! Prediction pipeline: impute, predict, classify, derive risk, clamp.
//!
//! A pure function of the artifact store and the aligned row; no internal state, no
//! cross-request effects. Every failure surfaces as a [`ModelError`] so that "prediction
//! failed" is always observably distinct from "prediction succeeded with a low value".

use serde::Serialize;

use crate::align::AlignedMatrix;
use crate::artifacts::ArtifactStore;
use crate::error::ModelError;

/// Pass-probability cut-points for the risk classification.
///
/// Upper-inclusive: a probability of exactly 0.75 is `Low`, exactly 0.5 is `Medium`.
const LOW_RISK_CUTOFF: f64 = 0.75;
const MEDIUM_RISK_CUTOFF: f64 = 0.5;

/// Predicted marks are reported on the training target's scale.
const MARKS_MIN: f64 = 0.0;
const MARKS_MAX: f64 = 100.0;

/// Three-tier risk classification derived from the pass probability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RiskLevel::Low => write!(f, "Low"),
            RiskLevel::Medium => write!(f, "Medium"),
            RiskLevel::High => write!(f, "High"),
        }
    }
}

/// Outcome of one prediction call, bounded and ready for the response boundary.
#[derive(Debug, Clone, Serialize)]
pub struct PredictionResult {
    pub predicted_marks: f64,
    pub pass_probability: f64,
    pub risk_level: RiskLevel,
}

/// Runs the fitted pipeline over one aligned row.
///
/// The imputer's `transform` applies fill values learned strictly at training time; nothing
/// is refit per request. Estimator outputs are clamped before returning since the upstream
/// models are not guaranteed to respect the target bounds.
pub fn run(store: &ArtifactStore, matrix: &AlignedMatrix) -> Result<PredictionResult, ModelError> {
    let mut row = matrix.values.clone();
    store.imputer.transform(&mut row)?;

    let marks = store.regression.predict(&row)?;
    let probability = store.classifier.predict_proba(&row)?;

    // A degenerate classifier can emit NaN; fall back to an uninformative probability
    // rather than letting NaN leak into the response.
    let probability = if probability.is_nan() {
        0.5
    } else {
        probability.clamp(0.0, 1.0)
    };

    Ok(PredictionResult {
        predicted_marks: clamp_marks(marks),
        pass_probability: probability,
        risk_level: risk_level(probability),
    })
}

/// Fixed threshold policy over the pass probability.
pub fn risk_level(pass_probability: f64) -> RiskLevel {
    if pass_probability >= LOW_RISK_CUTOFF {
        RiskLevel::Low
    } else if pass_probability >= MEDIUM_RISK_CUTOFF {
        RiskLevel::Medium
    } else {
        RiskLevel::High
    }
}

fn clamp_marks(marks: f64) -> f64 {
    if marks.is_nan() {
        MARKS_MIN
    } else {
        marks.clamp(MARKS_MIN, MARKS_MAX)
    }
}
