//! Feature alignment.
//!
//! Maps an arbitrary, possibly incomplete request payload onto the exact column layout the
//! estimators were fit against. Categorical features absent from the request are treated as
//! the sentinel `"Missing"` category before encoding; numeric features that are absent or
//! non-numeric stay undefined so that the imputer — not ad hoc zero-fill — supplies the value.

use std::collections::HashSet;

use serde_json::Value;

use crate::error::ModelError;
use crate::schema::{TrainingSchema, category_label};

/// Sentinel category substituted for categorical features absent from the request.
const MISSING_CATEGORY: &str = "Missing";

/// Raw request payload: feature name to client-supplied value. Unknown keys are tolerated
/// and simply never selected into the aligned row.
pub type InferenceRequest = serde_json::Map<String, Value>;

/// A single-row numeric matrix whose columns exactly match the training-time layout.
///
/// Undefined numeric cells are NaN until the imputer fills them.
#[derive(Debug, Clone)]
pub struct AlignedMatrix {
    pub columns: Vec<String>,
    pub values: Vec<f64>,
}

/// Aligns request payloads against one training schema.
pub struct FeatureAligner<'a> {
    schema: &'a TrainingSchema,
}

impl<'a> FeatureAligner<'a> {
    pub fn new(schema: &'a TrainingSchema) -> Self {
        Self { schema }
    }

    /// Produces the aligned row for `request`.
    ///
    /// Column order follows `encoded_columns` exactly; the estimators are positional, so a
    /// reordering here would silently corrupt every prediction downstream.
    pub fn align(&self, request: &InferenceRequest) -> Result<AlignedMatrix, ModelError> {
        if self.schema.encoded_columns.is_empty() {
            return Err(ModelError::SchemaMismatch(
                "encoded column layout is empty or uninitialized".to_string(),
            ));
        }

        // Dummy columns activated by this request, under the same naming convention the
        // training-time encoder used. The sentinel and unseen categories activate nothing,
        // which leaves all of that feature's dummies at zero — the k-1 reference encoding.
        let mut active_dummies: HashSet<String> = HashSet::new();
        for feature in &self.schema.categorical_features {
            let category = match request.get(feature) {
                Some(Value::Null) | None => MISSING_CATEGORY.to_string(),
                Some(value) => category_label(value),
            };
            active_dummies.insert(TrainingSchema::dummy_column(feature, &category));
        }

        let numeric: HashSet<&str> = self
            .schema
            .numeric_features
            .iter()
            .map(String::as_str)
            .collect();

        let mut values = Vec::with_capacity(self.schema.width());
        for column in &self.schema.encoded_columns {
            if numeric.contains(column.as_str()) {
                values.push(numeric_cell(request.get(column)));
            } else {
                values.push(if active_dummies.contains(column) {
                    1.0
                } else {
                    0.0
                });
            }
        }

        Ok(AlignedMatrix {
            columns: self.schema.encoded_columns.clone(),
            values,
        })
    }
}

/// Coerces a raw cell to a numeric value, NaN when absent or unparseable.
///
/// Numeric strings are accepted; anything else is left undefined for the imputer rather
/// than rejected.
fn numeric_cell(value: Option<&Value>) -> f64 {
    match value {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(f64::NAN),
        Some(Value::String(s)) => s.trim().parse::<f64>().unwrap_or(f64::NAN),
        _ => f64::NAN,
    }
}
