use crate::state::AppState;
use axum::{Router, routing::post};

mod common;
mod post;

pub use common::PredictionResponse;
pub use post::predict;

/// Builds the `/predict` route group.
pub fn predict_routes() -> Router<AppState> {
    Router::new().route("/", post(predict))
}
