pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::board::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        // Widget page and its forms
        .route("/", get(handlers::handle_page))
        .route("/upload", post(handlers::handle_upload))
        .route("/filter", post(handlers::handle_filter))
        .route("/sort", post(handlers::handle_sort))
        .route("/jobs/:index", post(handlers::handle_open_detail))
        .route("/detail/dismiss", post(handlers::handle_dismiss_detail))
        // Read-only JSON view of the same state
        .route("/api/v1/board", get(handlers::handle_snapshot))
        .layer(DefaultBodyLimit::max(upload_limit))
        .with_state(state)
}
