use model::PredictionResult;
use serde::Serialize;

/// Response body for a successful prediction.
#[derive(Serialize, Default)]
pub struct PredictionResponse {
    pub predicted_marks: f64,
    pub pass_probability: f64,
    pub risk_level: String,
}

impl From<PredictionResult> for PredictionResponse {
    fn from(result: PredictionResult) -> Self {
        Self {
            predicted_marks: round2(result.predicted_marks),
            pass_probability: round4(result.pass_probability),
            risk_level: result.risk_level.to_string(),
        }
    }
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

fn round4(x: f64) -> f64 {
    (x * 10_000.0).round() / 10_000.0
}
