use std::path::Path;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use tower_http::{cors::CorsLayer, services::ServeDir};

use crate::state::AppState;

mod health;
mod highlights;
mod videos;

pub fn router(state: AppState, uploads_dir: &Path, max_upload_bytes: usize) -> Router {
    Router::new()
        .route("/api/health", get(health::health))
        .route("/api/videos/upload-file", post(videos::upload_file))
        .route("/api/videos/import-youtube", post(videos::import_youtube))
        .route("/api/highlights/find", post(highlights::find))
        .nest_service("/uploads", ServeDir::new(uploads_dir))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
