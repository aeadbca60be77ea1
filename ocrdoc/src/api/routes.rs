use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::frontend;
use super::handlers;
use super::openapi;
use super::AppState;

/// Room for multipart boundaries and part headers on top of the file ceiling.
const MULTIPART_OVERHEAD: usize = 64 * 1024;

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let body_limit = state.config.upload.max_file_size + MULTIPART_OVERHEAD;

    Router::new()
        .route("/", get(frontend::serve_root))
        .route("/health", get(handlers::health_check))
        .route("/upload", post(handlers::upload::upload_file))
        .route("/download-docx", post(handlers::export::download_docx))
        .route("/openapi.json", get(openapi::openapi_json))
        .merge(openapi::redoc_router())
        .route("/{*path}", get(frontend::serve_path))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
