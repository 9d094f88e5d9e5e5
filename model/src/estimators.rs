//! Fitted estimator parameters deserialized from the artifact bundle.
//!
//! All three estimators are bound once at load time and applied per request; none of them
//! refit on inference data. They consume the aligned row positionally, so every one of them
//! validates its own width against the incoming row before touching it.

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// Fills undefined (NaN) cells with the per-column statistics learned at training time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Imputer {
    /// One fill value per encoded column, e.g. the training-time column mean.
    pub statistics: Vec<f64>,
}

impl Imputer {
    /// Applies the learned fill values in place. Only undefined cells are touched.
    pub fn transform(&self, row: &mut [f64]) -> Result<(), ModelError> {
        if row.len() != self.statistics.len() {
            return Err(ModelError::EstimatorFailure(format!(
                "imputer was fit on {} columns but received {}",
                self.statistics.len(),
                row.len()
            )));
        }
        for (cell, fill) in row.iter_mut().zip(&self.statistics) {
            if cell.is_nan() {
                *cell = *fill;
            }
        }
        Ok(())
    }
}

/// Linear point predictor for the marks target.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearRegressor {
    pub intercept: f64,
    pub coefficients: Vec<f64>,
}

impl LinearRegressor {
    pub fn predict(&self, row: &[f64]) -> Result<f64, ModelError> {
        Ok(self.intercept + dot(&self.coefficients, row, "regression model")?)
    }
}

/// Logistic classifier producing the positive-class (pass) probability.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogisticClassifier {
    pub intercept: f64,
    pub coefficients: Vec<f64>,
}

impl LogisticClassifier {
    pub fn predict_proba(&self, row: &[f64]) -> Result<f64, ModelError> {
        let margin = self.intercept + dot(&self.coefficients, row, "classification model")?;
        Ok(sigmoid(margin))
    }
}

fn dot(coefficients: &[f64], row: &[f64], who: &str) -> Result<f64, ModelError> {
    if coefficients.len() != row.len() {
        return Err(ModelError::EstimatorFailure(format!(
            "{who} was fit on {} columns but received {}",
            coefficients.len(),
            row.len()
        )));
    }
    Ok(coefficients.iter().zip(row).map(|(c, x)| c * x).sum())
}

fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn imputer_fills_only_undefined_cells() {
        let imputer = Imputer {
            statistics: vec![10.0, 20.0, 30.0],
        };
        let mut row = vec![1.0, f64::NAN, 3.0];
        imputer.transform(&mut row).unwrap();
        assert_eq!(row, vec![1.0, 20.0, 3.0]);
    }

    #[test]
    fn imputer_rejects_width_mismatch() {
        let imputer = Imputer {
            statistics: vec![0.0, 0.0],
        };
        let mut row = vec![1.0];
        assert!(matches!(
            imputer.transform(&mut row),
            Err(ModelError::EstimatorFailure(_))
        ));
    }

    #[test]
    fn regressor_is_intercept_plus_weighted_sum() {
        let model = LinearRegressor {
            intercept: -0.1,
            coefficients: vec![0.3, 0.4, 0.5],
        };
        let marks = model.predict(&[0.0, 1.0, 1.0]).unwrap();
        assert!((marks - 0.8).abs() < 1e-12);
    }

    #[test]
    fn classifier_probability_is_bounded_and_monotone_in_margin() {
        let model = LogisticClassifier {
            intercept: 0.0,
            coefficients: vec![1.0],
        };
        let low = model.predict_proba(&[-5.0]).unwrap();
        let mid = model.predict_proba(&[0.0]).unwrap();
        let high = model.predict_proba(&[5.0]).unwrap();
        assert!(low < mid && mid < high);
        assert!((mid - 0.5).abs() < 1e-12);
        assert!((0.0..=1.0).contains(&low) && (0.0..=1.0).contains(&high));
    }

    #[test]
    fn estimators_reject_width_mismatch() {
        let model = LinearRegressor {
            intercept: 0.0,
            coefficients: vec![1.0, 2.0],
        };
        assert!(matches!(
            model.predict(&[1.0]),
            Err(ModelError::EstimatorFailure(_))
        ));
    }
}
