pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::generation::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/generate-pdf/", post(handlers::handle_generate_pdf))
        .route(
            "/generate-cover-letter/",
            post(handlers::handle_generate_cover_letter),
        )
        .with_state(state)
}
