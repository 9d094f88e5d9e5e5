use crate::state::AppState;
use axum::{Router, routing::post};

mod common;
mod post;

pub use common::{ChatResponse, TestResponse};
pub use post::{chat_with_tutor, generate_full_test};

/// Builds the `/tutor` route group.
pub fn tutor_routes() -> Router<AppState> {
    Router::new()
        .route("/chat", post(chat_with_tutor))
        .route("/generate-test", post(generate_full_test))
}
