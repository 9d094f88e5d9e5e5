//! Model Error Types
//!
//! This module defines the [`ModelError`] enum, which encapsulates all error types that can occur
//! while loading the trained artifact bundle, aligning request features against the training-time
//! column layout, and running the estimators.
//! Each variant carries a descriptive message so that callers can surface a clearly labeled
//! failure instead of a garbled numeric result.
//!
//! # Usage
//!
//! Use [`ModelError`] as the error type in functions that may fail due to artifact, schema, or
//! estimator issues. All three kinds are caught at the prediction boundary and turned into a
//! tagged failure response; none of them should crash the process per request.
//!
//! # Example
//!
//! ```rust
//! use model::error::ModelError;
//!
//! fn check_columns(columns: &[String]) -> Result<(), ModelError> {
//!     if columns.is_empty() {
//!         return Err(ModelError::SchemaMismatch("encoded column layout is empty".to_string()));
//!     }
//!     Ok(())
//! }
//! ```

use std::fmt;

/// Represents all error types that can occur in the prediction core.
#[derive(Debug, Clone, PartialEq)]
pub enum ModelError {
    /// The artifact bundle is missing, unreadable, malformed, or missing a required key.
    /// Fatal for the process lifetime: every later call fails fast with this condition.
    ArtifactLoad(String),
    /// The aligned columns cannot be reconciled with the training-time layout.
    SchemaMismatch(String),
    /// The imputer or one of the estimators failed during transform/predict.
    EstimatorFailure(String),
}

impl fmt::Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelError::ArtifactLoad(msg) => write!(f, "artifact bundle unavailable: {msg}"),
            ModelError::SchemaMismatch(msg) => write!(f, "schema mismatch: {msg}"),
            ModelError::EstimatorFailure(msg) => write!(f, "estimator failure: {msg}"),
        }
    }
}

impl std::error::Error for ModelError {}
