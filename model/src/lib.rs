//! # Student Performance Model
//!
//! Core library for serving a pretrained student-performance model: loading the trained
//! artifact bundle, reconstructing the training-time feature layout from raw request
//! payloads, and producing bounded predictions with a three-tier risk classification.
//!
//! ## Key Concepts
//! - **ArtifactStore**: the immutable trained objects (imputer, regression and
//!   classification estimators, column schema), deserialized once at process start.
//! - **FeatureAligner**: maps an arbitrary key-value payload onto the exact encoded column
//!   layout the estimators were fit against, routing missing numeric values to the imputer.
//! - **Predictor**: impute, predict marks, predict pass probability, derive risk, clamp.
//! - **PerformanceModel**: the facade the request boundary calls; holds the load outcome
//!   and fails fast with a clearly labeled condition when the bundle never loaded.

pub mod align;
pub mod artifacts;
pub mod error;
pub mod estimators;
pub mod predict;
pub mod schema;

use std::path::Path;
use std::sync::Arc;

pub use align::{AlignedMatrix, FeatureAligner, InferenceRequest};
pub use artifacts::ArtifactStore;
pub use error::ModelError;
pub use predict::{PredictionResult, RiskLevel};
pub use schema::TrainingSchema;

/// Facade over the prediction core.
///
/// Constructed once at startup and shared behind `Arc`; every call is an independent pure
/// computation over the immutable store, so concurrent requests need no locking.
#[derive(Clone)]
pub struct PerformanceModel {
    store: Option<Arc<ArtifactStore>>,
    load_error: Option<String>,
}

impl PerformanceModel {
    /// Loads the bundle at `path`. A failed load does not abort the process: the model is
    /// constructed in a permanent unavailable state and every `predict` call reports the
    /// remembered load error.
    pub fn init(path: &Path) -> Self {
        match ArtifactStore::load(path) {
            Ok(store) => Self {
                store: Some(Arc::new(store)),
                load_error: None,
            },
            Err(e) => {
                tracing::error!("prediction model unavailable: {e}");
                Self {
                    store: None,
                    load_error: Some(e.to_string()),
                }
            }
        }
    }

    /// Wraps an already-validated store. Used by tests and by callers that build bundles
    /// in memory.
    pub fn from_store(store: ArtifactStore) -> Self {
        Self {
            store: Some(Arc::new(store)),
            load_error: None,
        }
    }

    /// Whether the artifact bundle loaded successfully at startup.
    pub fn is_available(&self) -> bool {
        self.store.is_some()
    }

    /// Aligns `request` against the training schema and runs the fitted pipeline.
    pub fn predict(&self, request: &InferenceRequest) -> Result<PredictionResult, ModelError> {
        let store = self.store.as_deref().ok_or_else(|| {
            ModelError::ArtifactLoad(
                self.load_error
                    .clone()
                    .unwrap_or_else(|| "artifact bundle was never loaded".to_string()),
            )
        })?;

        let matrix = FeatureAligner::new(&store.schema).align(request)?;
        predict::run(store, &matrix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::estimators::{Imputer, LinearRegressor, LogisticClassifier};
    use serde_json::json;

    fn model() -> PerformanceModel {
        PerformanceModel::from_store(ArtifactStore {
            schema: TrainingSchema::from_encoded_columns(
                vec!["attendance".to_string()],
                vec!["lunch".to_string()],
                vec!["attendance".to_string(), "lunch_standard".to_string()],
            )
            .unwrap(),
            imputer: Imputer {
                statistics: vec![70.0, 1.0],
            },
            regression: LinearRegressor {
                intercept: 20.0,
                coefficients: vec![0.5, 10.0],
            },
            classifier: LogisticClassifier {
                intercept: -3.0,
                coefficients: vec![0.05, 1.0],
            },
        })
    }

    fn request(value: serde_json::Value) -> InferenceRequest {
        value.as_object().unwrap().clone()
    }

    #[test]
    fn predicts_from_a_partial_payload() {
        let result = model().predict(&request(json!({"attendance": 90}))).unwrap();
        assert!((result.predicted_marks - 65.0).abs() < 1e-12);
        assert!((0.0..=1.0).contains(&result.pass_probability));
    }

    #[test]
    fn unavailable_model_returns_a_tagged_failure_for_every_request() {
        let broken = PerformanceModel::init(Path::new("missing/bundle.json"));
        assert!(!broken.is_available());

        let err = broken
            .predict(&request(json!({"attendance": 90})))
            .unwrap_err();
        // Never a numeric zero dressed up as a real prediction.
        assert!(matches!(err, ModelError::ArtifactLoad(_)));

        let err = broken.predict(&request(json!({}))).unwrap_err();
        assert!(matches!(err, ModelError::ArtifactLoad(_)));
    }

    #[test]
    fn empty_request_still_predicts_through_the_imputer() {
        // All numeric values imputed, all dummies zero.
        let result = model().predict(&request(json!({}))).unwrap();
        assert!((result.predicted_marks - 55.0).abs() < 1e-12);
    }
}
