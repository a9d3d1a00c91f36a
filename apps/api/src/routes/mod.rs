pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::export::handlers as export_handlers;
use crate::generation::handlers as generation_handlers;
use crate::resume::handlers as resume_handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        // Resume preview
        .route(
            "/api/v1/resume/extract",
            post(resume_handlers::handle_extract),
        )
        // Generation run and export
        .route("/api/v1/packages", post(generation_handlers::handle_generate))
        .route(
            "/api/v1/packages/export",
            post(export_handlers::handle_export),
        )
        .layer(DefaultBodyLimit::max(upload_limit))
        .with_state(state)
}
