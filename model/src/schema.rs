//! Training-time column schema.
//!
//! The estimators consume unlabeled numeric arrays, so column order is significant end to end.
//! [`TrainingSchema`] carries the exact ordered layout the estimators were fit against:
//! the numeric feature names first, followed by the drop-first dummy columns produced by
//! one-hot-encoding the categorical features.

use std::collections::BTreeSet;

use serde_json::Value;

use crate::error::ModelError;

/// Separator between a categorical feature name and its category in a dummy column name,
/// e.g. `parental level of education_some college`.
const DUMMY_SEPARATOR: char = '_';

/// Immutable description of the column layout the estimators were trained on.
///
/// Constructed once when the artifact bundle is loaded and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct TrainingSchema {
    /// Ordered feature names expected as numeric inputs.
    pub numeric_features: Vec<String>,
    /// Ordered feature names expected as categorical inputs. May be empty.
    pub categorical_features: Vec<String>,
    /// The full ordered column layout after encoding: numeric features, then dummy columns.
    pub encoded_columns: Vec<String>,
}

impl TrainingSchema {
    /// Builds a schema from a precomputed encoded-column layout.
    ///
    /// Fails with [`ModelError::ArtifactLoad`] when the layout is empty or does not start
    /// with the numeric features in order, since a disagreeing layout means the bundle was
    /// not produced by the training pipeline this schema models.
    pub fn from_encoded_columns(
        numeric_features: Vec<String>,
        categorical_features: Vec<String>,
        encoded_columns: Vec<String>,
    ) -> Result<Self, ModelError> {
        if encoded_columns.is_empty() {
            return Err(ModelError::ArtifactLoad(
                "encoded column layout is empty".to_string(),
            ));
        }
        if encoded_columns.len() < numeric_features.len() {
            return Err(ModelError::ArtifactLoad(format!(
                "encoded column layout has {} columns but {} numeric features were declared",
                encoded_columns.len(),
                numeric_features.len()
            )));
        }
        for (i, name) in numeric_features.iter().enumerate() {
            if &encoded_columns[i] != name {
                return Err(ModelError::ArtifactLoad(format!(
                    "encoded column {} is '{}' but numeric feature '{}' was expected there",
                    i, encoded_columns[i], name
                )));
            }
        }

        Ok(Self {
            numeric_features,
            categorical_features,
            encoded_columns,
        })
    }

    /// Rederives the encoded layout from the raw training table the estimators were fit on.
    ///
    /// Reproduces the k-1 dummy convention the artifacts were produced with: per categorical
    /// feature, distinct values sorted lexicographically, first category dropped, remaining
    /// categories emitted as `{feature}_{value}` columns after the numeric block.
    pub fn from_training_frame(
        numeric_features: Vec<String>,
        categorical_features: Vec<String>,
        frame: &[serde_json::Map<String, Value>],
    ) -> Result<Self, ModelError> {
        if frame.is_empty() {
            return Err(ModelError::ArtifactLoad(
                "training frame is empty, cannot derive the encoded column layout".to_string(),
            ));
        }

        let mut encoded_columns = numeric_features.clone();
        for feature in &categorical_features {
            // BTreeSet gives the sorted distinct categories directly.
            let mut categories = BTreeSet::new();
            for row in frame {
                match row.get(feature) {
                    Some(value) => categories.insert(category_label(value)),
                    None => {
                        return Err(ModelError::ArtifactLoad(format!(
                            "training frame row is missing categorical feature '{feature}'"
                        )));
                    }
                };
            }
            // Drop the first (reference) category.
            for category in categories.into_iter().skip(1) {
                encoded_columns.push(format!("{feature}{DUMMY_SEPARATOR}{category}"));
            }
        }

        if encoded_columns.is_empty() {
            return Err(ModelError::ArtifactLoad(
                "derived an empty encoded column layout".to_string(),
            ));
        }

        Ok(Self {
            numeric_features,
            categorical_features,
            encoded_columns,
        })
    }

    /// Number of columns in the encoded layout.
    pub fn width(&self) -> usize {
        self.encoded_columns.len()
    }

    /// The dummy column name a categorical feature/value pair maps to.
    pub fn dummy_column(feature: &str, value: &str) -> String {
        format!("{feature}{DUMMY_SEPARATOR}{value}")
    }
}

/// Textual label of a categorical cell, matching how the training pipeline stringifies values.
pub(crate) fn category_label(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => "Missing".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn frame_from(rows: Vec<Value>) -> Vec<serde_json::Map<String, Value>> {
        rows.into_iter()
            .map(|r| r.as_object().unwrap().clone())
            .collect()
    }

    #[test]
    fn derives_sorted_drop_first_dummies_after_numeric_block() {
        let frame = frame_from(vec![
            json!({"study hours": 2.0, "lunch": "standard", "prep": "none"}),
            json!({"study hours": 4.0, "lunch": "free/reduced", "prep": "completed"}),
            json!({"study hours": 1.0, "lunch": "standard", "prep": "none"}),
        ]);

        let schema = TrainingSchema::from_training_frame(
            vec!["study hours".to_string()],
            vec!["lunch".to_string(), "prep".to_string()],
            &frame,
        )
        .unwrap();

        // "free/reduced" sorts before "standard" and is dropped; same for "completed".
        assert_eq!(
            schema.encoded_columns,
            vec!["study hours", "lunch_standard", "prep_none"]
        );
    }

    #[test]
    fn precomputed_layout_must_start_with_numeric_features() {
        let result = TrainingSchema::from_encoded_columns(
            vec!["attendance".to_string()],
            vec![],
            vec!["wrong".to_string()],
        );
        assert!(matches!(result, Err(ModelError::ArtifactLoad(_))));
    }

    #[test]
    fn empty_layout_is_rejected() {
        let result = TrainingSchema::from_encoded_columns(vec![], vec![], vec![]);
        assert!(matches!(result, Err(ModelError::ArtifactLoad(_))));
    }

    #[test]
    fn numeric_only_schema_is_valid() {
        let schema = TrainingSchema::from_encoded_columns(
            vec!["attendance".to_string(), "study_hours".to_string()],
            vec![],
            vec!["attendance".to_string(), "study_hours".to_string()],
        )
        .unwrap();
        assert_eq!(schema.width(), 2);
        assert!(schema.categorical_features.is_empty());
    }
}
