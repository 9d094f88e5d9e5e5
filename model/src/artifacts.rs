//! Artifact bundle loading.
//!
//! The trained objects are serialized together as a single JSON bundle produced by the
//! training pipeline: the ordered feature name lists, either the precomputed encoded-column
//! layout or the raw training table it can be rederived from, the fitted imputer statistics,
//! and both estimators' parameters. The bundle is read once at process start; everything in
//! [`ArtifactStore`] is read-only afterwards and safe to share across concurrent requests
//! without locking.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use serde_json::Value;

use crate::error::ModelError;
use crate::estimators::{Imputer, LinearRegressor, LogisticClassifier};
use crate::schema::TrainingSchema;

/// On-disk shape of the serialized bundle.
///
/// `encoded_columns` and `training_frame` are alternatives: newer bundles precompute the
/// layout, older ones ship the raw table instead. At least one must be present.
#[derive(Debug, Deserialize)]
pub struct ArtifactBundle {
    pub numeric_features: Vec<String>,
    pub categorical_features: Vec<String>,
    #[serde(default)]
    pub encoded_columns: Option<Vec<String>>,
    #[serde(default)]
    pub training_frame: Option<Vec<serde_json::Map<String, Value>>>,
    pub imputer: Imputer,
    pub regression_model: LinearRegressor,
    pub classification_model: LogisticClassifier,
}

/// The immutable trained objects, validated against each other.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    pub schema: TrainingSchema,
    pub imputer: Imputer,
    pub regression: LinearRegressor,
    pub classifier: LogisticClassifier,
}

impl ArtifactStore {
    /// Reads and validates the bundle at `path`.
    ///
    /// Any failure here (missing file, malformed JSON, missing key, estimator widths that
    /// disagree with the column layout) is an [`ModelError::ArtifactLoad`] and leaves the
    /// caller in a permanent unavailable state for the process lifetime.
    pub fn load(path: &Path) -> Result<Self, ModelError> {
        let raw = fs::read_to_string(path).map_err(|e| {
            ModelError::ArtifactLoad(format!("failed to read bundle {}: {e}", path.display()))
        })?;
        let bundle: ArtifactBundle = serde_json::from_str(&raw).map_err(|e| {
            ModelError::ArtifactLoad(format!("failed to parse bundle {}: {e}", path.display()))
        })?;
        Self::from_bundle(bundle)
    }

    /// Validates an already-deserialized bundle.
    pub fn from_bundle(bundle: ArtifactBundle) -> Result<Self, ModelError> {
        let schema = match (bundle.encoded_columns, bundle.training_frame) {
            (Some(columns), _) => TrainingSchema::from_encoded_columns(
                bundle.numeric_features,
                bundle.categorical_features,
                columns,
            )?,
            (None, Some(frame)) => TrainingSchema::from_training_frame(
                bundle.numeric_features,
                bundle.categorical_features,
                &frame,
            )?,
            (None, None) => {
                return Err(ModelError::ArtifactLoad(
                    "bundle carries neither encoded_columns nor training_frame".to_string(),
                ));
            }
        };

        let width = schema.width();
        check_width("imputer", bundle.imputer.statistics.len(), width)?;
        check_width(
            "regression model",
            bundle.regression_model.coefficients.len(),
            width,
        )?;
        check_width(
            "classification model",
            bundle.classification_model.coefficients.len(),
            width,
        )?;

        tracing::info!(
            columns = width,
            numeric = schema.numeric_features.len(),
            categorical = schema.categorical_features.len(),
            "artifact bundle loaded"
        );

        Ok(Self {
            schema,
            imputer: bundle.imputer,
            regression: bundle.regression_model,
            classifier: bundle.classification_model,
        })
    }
}

fn check_width(who: &str, got: usize, expected: usize) -> Result<(), ModelError> {
    if got != expected {
        return Err(ModelError::ArtifactLoad(format!(
            "{who} carries {got} columns but the encoded layout has {expected}"
        )));
    }
    Ok(())
}
