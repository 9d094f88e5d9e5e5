use axum::{Json, extract::State, http::StatusCode};

use crate::{response::ApiResponse, state::AppState};
use model::{InferenceRequest, ModelError};

use super::common::PredictionResponse;

/// POST /api/predict
///
/// Accepts a free-form JSON object mapping feature names to raw values and returns the
/// bounded prediction. Missing or non-numeric fields are legal: they are routed through
/// the training-time imputer rather than rejected or zero-filled. Unknown keys are
/// ignored.
///
/// A failed prediction is always a non-2xx response with a labeled message — never a
/// numeric zero dressed up as a real result.
///
/// ### Responses
/// - `200 OK` with `{ predicted_marks, pass_probability, risk_level }`
/// - `503 SERVICE_UNAVAILABLE` when the artifact bundle never loaded
/// - `422 UNPROCESSABLE_ENTITY` when the request cannot be reconciled with the
///   training-time column layout
/// - `500 INTERNAL_SERVER_ERROR` when an estimator fails
pub async fn predict(
    State(state): State<AppState>,
    Json(body): Json<InferenceRequest>,
) -> (StatusCode, Json<ApiResponse<PredictionResponse>>) {
    let model = state.model();

    // Fail fast before attempting alignment.
    if !model.is_available() {
        return (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ApiResponse::error("Prediction model unavailable")),
        );
    }

    match model.predict(&body) {
        Ok(result) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                PredictionResponse::from(result),
                "Prediction complete",
            )),
        ),
        Err(e @ ModelError::ArtifactLoad(_)) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ApiResponse::error(format!("Prediction failed: {e}"))),
        ),
        Err(e @ ModelError::SchemaMismatch(_)) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ApiResponse::error(format!("Prediction failed: {e}"))),
        ),
        Err(e @ ModelError::EstimatorFailure(_)) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::error(format!("Prediction failed: {e}"))),
        ),
    }
}
