//! End-to-end tests over the assembled router: real routing, JSON envelopes, and status
//! mapping, with no live generation upstream (tutor endpoints exercise their fallbacks).

use api::routes::routes;
use api::state::AppState;
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header::CONTENT_TYPE},
};
use model::estimators::{Imputer, LinearRegressor, LogisticClassifier};
use model::{ArtifactStore, PerformanceModel, TrainingSchema};
use serde_json::{Value, json};
use std::path::Path;
use tower::ServiceExt;

fn app_with_model() -> Router {
    let store = ArtifactStore {
        schema: TrainingSchema::from_encoded_columns(
            vec!["attendance".to_string(), "study_hours".to_string()],
            vec!["lunch".to_string()],
            vec![
                "attendance".to_string(),
                "study_hours".to_string(),
                "lunch_standard".to_string(),
            ],
        )
        .unwrap(),
        imputer: Imputer {
            statistics: vec![75.0, 3.0, 1.0],
        },
        regression: LinearRegressor {
            intercept: 10.0,
            coefficients: vec![0.5, 5.0, 2.0],
        },
        classifier: LogisticClassifier {
            intercept: -4.0,
            coefficients: vec![0.05, 0.2, 0.5],
        },
    };
    routes(AppState::new(PerformanceModel::from_store(store), None))
}

fn app_without_model() -> Router {
    routes(AppState::new(
        PerformanceModel::init(Path::new("no/such/bundle.json")),
        None,
    ))
}

async fn send_json(app: Router, method: &str, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn health_reports_availability_flags() {
    let response = app_with_model()
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(json["data"]["model_available"], true);
    assert_eq!(json["data"]["tutor_available"], false);
}

#[tokio::test]
async fn predict_round_trips_a_full_payload() {
    let (status, json) = send_json(
        app_with_model(),
        "POST",
        "/predict",
        json!({"attendance": 80, "study_hours": 4, "lunch": "standard"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], true);
    // 10 + 0.5*80 + 5*4 + 2*1
    assert_eq!(json["data"]["predicted_marks"], 72.0);
    let probability = json["data"]["pass_probability"].as_f64().unwrap();
    assert!((0.0..=1.0).contains(&probability));
    assert!(
        ["Low", "Medium", "High"].contains(&json["data"]["risk_level"].as_str().unwrap())
    );
}

#[tokio::test]
async fn predict_tolerates_partial_and_unknown_fields() {
    let (status, json) = send_json(
        app_with_model(),
        "POST",
        "/predict",
        json!({"study_hours": "4", "favourite_colour": "green"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], true);
    // attendance imputed to 75, lunch dummy stays 0: 10 + 37.5 + 20
    assert_eq!(json["data"]["predicted_marks"], 67.5);
}

#[tokio::test]
async fn predict_returns_503_when_the_bundle_never_loaded() {
    let (status, json) = send_json(
        app_without_model(),
        "POST",
        "/predict",
        json!({"attendance": 80}),
    )
    .await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(json["success"], false);
    assert!(
        json["message"]
            .as_str()
            .unwrap()
            .contains("unavailable")
    );
}

#[tokio::test]
async fn tutor_chat_serves_fallback_copy_without_an_upstream() {
    let (status, json) = send_json(
        app_without_model(),
        "POST",
        "/tutor/chat",
        json!({"message": "Explain fractions"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], true);
    assert!(!json["data"]["reply"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn tutor_test_generation_serves_subject_templated_fallback() {
    let (status, json) = send_json(
        app_without_model(),
        "POST",
        "/tutor/generate-test",
        json!({"subject": "geometry"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let questions = json["data"]["questions"].as_array().unwrap();
    assert!(!questions.is_empty());
    assert!(questions[0].as_str().unwrap().contains("geometry"));
}
