use axum::Json;
use utoipa::OpenApi;
use utoipa_redoc::{Redoc, Servable};

use super::handlers;
use super::response;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "ocrdoc API",
        version = "1.0.0",
        description = "PDF text extraction via Mistral OCR, with markdown to DOCX export.",
    ),
    paths(
        handlers::health::health_check,
        handlers::upload::upload_file,
        handlers::export::download_docx,
    ),
    components(schemas(
        response::ErrorBody,
        response::UploadResponse,
        handlers::export::DownloadRequest,
        handlers::health::HealthData,
        handlers::health::OcrStatus,
        handlers::health::UploadStatus,
    )),
    tags(
        (name = "health", description = "Health check"),
        (name = "ocr", description = "PDF upload and text extraction"),
        (name = "export", description = "Markdown to DOCX conversion"),
    ),
)]
pub struct ApiDoc;

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

pub fn redoc_router<S: Clone + Send + Sync + 'static>() -> axum::Router<S> {
    Redoc::with_url("/docs", ApiDoc::openapi()).into()
}
