//! HTTP route entry point for `/api/...`.
//!
//! This module defines all HTTP entry points under the `/api` namespace.
//! Routes are organized by domain, one group per concern:
//!
//! - `/health` → Liveness probe reporting model availability (public)
//! - `/predict` → Student performance prediction
//! - `/tutor` → LLM-backed tutoring chat and test generation

use crate::routes::{health::health_routes, predict::predict_routes, tutor::tutor_routes};
use crate::state::AppState;
use axum::Router;

pub mod health;
pub mod predict;
pub mod tutor;

/// Builds the complete application router for all HTTP endpoints.
///
/// The returned router mounts all route groups under their respective base paths:
/// - `/health` → Health check endpoint (no request body).
/// - `/predict` → `POST /` prediction over a free-form feature payload.
/// - `/tutor` → `POST /chat` and `POST /generate-test`.
pub fn routes(app_state: AppState) -> Router {
    Router::new()
        .nest("/health", health_routes())
        .nest("/predict", predict_routes())
        .nest("/tutor", tutor_routes())
        .with_state(app_state)
}
