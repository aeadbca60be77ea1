//! `POST /download-docx`: markdown text in, DOCX attachment out.

use axum::body::Body;
use axum::http::{header, StatusCode};
use axum::response::Response;
use serde::{Deserialize, Serialize};
use tracing::info;
use validator::Validate;

use crate::api::extractors::AppJson;
use crate::api::response::ErrorBody;
use crate::error::{OcrDocError, Result};
use crate::export::{
    content_disposition, download_filename, markdown_to_rich, render_docx, DOCX_CONTENT_TYPE,
};

const UNKNOWN_SOURCE: &str = "unknown";

#[derive(Debug, Clone, Serialize, Deserialize, Validate, utoipa::ToSchema)]
pub struct DownloadRequest {
    /// Markdown text, typically the `result` of `POST /upload`.
    #[validate(length(min = 1, message = "No text provided"))]
    pub text: String,
    /// Name of the source document; drives the attachment name.
    #[serde(default)]
    #[validate(length(max = 255, message = "Filename too long (max 255 characters)"))]
    pub filename: String,
}

fn validation_message(errors: &validator::ValidationErrors) -> String {
    errors
        .field_errors()
        .values()
        .flat_map(|errs| errs.iter())
        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
        .next()
        .unwrap_or_else(|| errors.to_string())
}

/// `POST /download-docx`
///
/// Converts markdown text into a formatted DOCX document and returns it as an
/// attachment named after the source file.
#[utoipa::path(
    post,
    path = "/download-docx",
    tag = "export",
    operation_id = "export.docx",
    request_body = DownloadRequest,
    responses(
        (status = 200, description = "DOCX document returned as an attachment"),
        (status = 400, description = "Invalid request", body = ErrorBody),
        (status = 500, description = "Export failure", body = ErrorBody),
    )
)]
pub async fn download_docx(AppJson(req): AppJson<DownloadRequest>) -> Result<Response> {
    req.validate()
        .map_err(|e| OcrDocError::Validation(validation_message(&e)))?;

    let source = match req.filename.trim() {
        "" => UNKNOWN_SOURCE,
        name => name,
    };

    let body = markdown_to_rich(&req.text);
    let bytes = render_docx(&body, source)?;
    let attachment = download_filename(&req.filename);

    info!(
        source = %source,
        attachment = %attachment,
        blocks = body.blocks.len(),
        bytes = bytes.len(),
        "DOCX export ready"
    );

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, DOCX_CONTENT_TYPE)
        .header(header::CONTENT_DISPOSITION, content_disposition(&attachment))
        .body(Body::from(bytes))
        .map_err(|e| OcrDocError::Export(format!("Failed to build response: {e}")))
}
