//! `POST /upload`: PDF in, OCR markdown out.

use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, State};
use axum::Json;
use tracing::info;
use uuid::Uuid;

use crate::api::response::{ErrorBody, UploadResponse};
use crate::api::AppState;
use crate::error::{OcrDocError, Result};
use crate::upload::{read_upload, stage};

/// `POST /upload`
///
/// Accepts a multipart form with a `file` field holding a PDF. The document
/// is sent to the OCR service and the extracted markdown is returned. Staged
/// copies of the upload are removed before the response is sent, whatever
/// the outcome.
#[utoipa::path(
    post,
    path = "/upload",
    tag = "ocr",
    operation_id = "ocr.upload",
    request_body(content_type = "multipart/form-data", content = String, description = "PDF file in the `file` field"),
    responses(
        (status = 200, description = "Text extracted", body = UploadResponse),
        (status = 400, description = "Missing, oversized or non-PDF upload", body = ErrorBody),
        (status = 500, description = "OCR service failure", body = ErrorBody),
    )
)]
#[tracing::instrument(skip_all, fields(upload_id = %Uuid::new_v4()))]
pub async fn upload_file(
    State(state): State<AppState>,
    multipart: std::result::Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResponse>> {
    let mut multipart = multipart.map_err(|e| OcrDocError::Validation(e.body_text()))?;

    let payload = read_upload(&mut multipart, state.config.upload.max_file_size).await?;
    info!(filename = %payload.filename, size = payload.size, "Upload accepted");

    let staged = stage(payload, &state.config.upload.storage).await?;
    let bytes = staged.bytes().await?;
    let result = state.ocr.extract_text(&bytes).await?;

    info!(
        filename = %staged.filename(),
        chars = result.len(),
        "OCR text returned"
    );

    Ok(Json(UploadResponse {
        success: true,
        result,
        filename: staged.filename().to_string(),
    }))
}
