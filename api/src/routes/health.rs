use crate::response::ApiResponse;
use crate::state::AppState;
use axum::{Json, Router, extract::State, response::IntoResponse, routing::get};
use serde::Serialize;

/// Builds the `/health` route group.
///
/// This includes a single `GET /health` endpoint that reports whether the process is up
/// and whether its two long-lived resources are usable. Useful for uptime checks, load
/// balancers, or deployment health monitoring.
pub fn health_routes() -> Router<AppState> {
    Router::new().route("/", get(health_check))
}

#[derive(Serialize, Default)]
pub struct HealthStatus {
    pub status: String,
    pub model_available: bool,
    pub tutor_available: bool,
}

/// GET /health
///
/// Returns a success response indicating the API is running. `model_available` is false
/// when the artifact bundle failed to load at startup (predictions then return 503);
/// `tutor_available` is false when no generation model answered the startup probe
/// (tutoring endpoints then serve fallback copy).
///
/// ### Response
/// - `200 OK`
///
/// ```json
/// {
///   "success": true,
///   "data": { "status": "ok", "model_available": true, "tutor_available": false },
///   "message": "Health check passed"
/// }
/// ```
async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    Json(ApiResponse::success(
        HealthStatus {
            status: "ok".to_string(),
            model_available: state.model().is_available(),
            tutor_available: state.tutor().is_some(),
        },
        "Health check passed",
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use model::PerformanceModel;
    use serde_json::Value;
    use std::path::Path;

    /// Unit test for `health_check` handler with a model that never loaded.
    ///
    /// Asserts that the JSON response matches the expected structure and values.
    #[tokio::test]
    async fn health_check_reports_unavailable_model() {
        let state = AppState::new(PerformanceModel::init(Path::new("no/such/bundle.json")), None);

        let response = health_check(State(state)).await.into_response();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: Value = serde_json::from_slice(&body).unwrap();

        assert_eq!(json["success"], true);
        assert_eq!(json["data"]["status"], "ok");
        assert_eq!(json["data"]["model_available"], false);
        assert_eq!(json["data"]["tutor_available"], false);
        assert_eq!(json["message"], "Health check passed");
    }
}
