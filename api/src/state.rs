//! Application state shared across Axum route handlers.
//!
//! Holds the two long-lived resources: the prediction model (loaded once at startup,
//! read-only afterwards) and the selected generation client for the tutoring endpoints.
//! Both are cheap to clone; concurrent requests share them without locking.

use std::sync::Arc;

use model::PerformanceModel;

use crate::services::gemini::GeminiClient;

/// Central application state shared across the server.
#[derive(Clone)]
pub struct AppState {
    model: PerformanceModel,
    tutor: Option<Arc<GeminiClient>>,
}

impl AppState {
    /// Creates a new `AppState`.
    ///
    /// # Arguments
    ///
    /// * `model` - The prediction model facade; may be in its unavailable state.
    /// * `tutor` - The generation client, or `None` when no upstream model answered
    ///   the startup probe (tutoring endpoints then serve fallback copy).
    pub fn new(model: PerformanceModel, tutor: Option<GeminiClient>) -> Self {
        Self {
            model,
            tutor: tutor.map(Arc::new),
        }
    }

    /// Returns a shared reference to the prediction model.
    pub fn model(&self) -> &PerformanceModel {
        &self.model
    }

    /// Returns the generation client, if one was selected at startup.
    pub fn tutor(&self) -> Option<&GeminiClient> {
        self.tutor.as_deref()
    }
}
