//! Upload/validation gateway.
//!
//! Reads the `file` field of a multipart submission, validates its name and
//! extension before touching the body, enforces the byte ceiling while the
//! body streams in, and stages the payload for the OCR adapter.

mod staging;

use axum::extract::multipart::MultipartError;
use axum::extract::Multipart;
use axum::http::StatusCode;

use crate::error::{OcrDocError, Result};

pub use staging::{stage, StagedUpload};

pub const FILE_FIELD: &str = "file";
pub const ALLOWED_EXTENSIONS: &[&str] = &["pdf"];

const NO_FILE_MESSAGE: &str = "No file selected";
const INVALID_TYPE_MESSAGE: &str = "Invalid file type. Please upload a PDF file.";

/// A validated upload, owned by the request handler.
#[derive(Debug, Clone)]
pub struct UploadedPayload {
    pub bytes: Vec<u8>,
    pub filename: String,
    pub size: usize,
}

/// `true` when the name has an extension from [`ALLOWED_EXTENSIONS`].
pub fn allowed_file(filename: &str) -> bool {
    filename
        .rsplit_once('.')
        .map(|(_, ext)| {
            ALLOWED_EXTENSIONS
                .iter()
                .any(|allowed| ext.eq_ignore_ascii_case(allowed))
        })
        .unwrap_or(false)
}

/// Reduce a client-supplied filename to a safe, flat ASCII name.
pub fn secure_filename(filename: &str) -> String {
    let base = filename.rsplit(['/', '\\']).next().unwrap_or("");

    let cleaned: String = base
        .chars()
        .filter_map(|c| match c {
            c if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') => Some(c),
            c if c.is_whitespace() => Some('_'),
            _ => None,
        })
        .collect();

    let cleaned = cleaned.trim_matches(|c| c == '.' || c == '_');
    if cleaned.is_empty() {
        "upload".to_string()
    } else {
        cleaned.to_string()
    }
}

fn map_multipart_error(err: MultipartError, read: usize, limit: usize) -> OcrDocError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        OcrDocError::PayloadTooLarge { size: read, limit }
    } else {
        OcrDocError::Validation(format!("Failed to read upload: {}", err.body_text()))
    }
}

/// Pull the `file` field out of a multipart body.
///
/// Name and extension are checked from the part headers, so disallowed files
/// are rejected before their bytes are read. The body is consumed chunk by
/// chunk and abandoned as soon as it crosses `max_file_size`.
pub async fn read_upload(multipart: &mut Multipart, max_file_size: usize) -> Result<UploadedPayload> {
    loop {
        let field = multipart
            .next_field()
            .await
            .map_err(|e| map_multipart_error(e, 0, max_file_size))?;

        let Some(mut field) = field else {
            return Err(OcrDocError::Validation(NO_FILE_MESSAGE.to_string()));
        };

        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let filename = field.file_name().unwrap_or("").trim().to_string();
        if filename.is_empty() {
            return Err(OcrDocError::Validation(NO_FILE_MESSAGE.to_string()));
        }
        if !allowed_file(&filename) {
            return Err(OcrDocError::Validation(INVALID_TYPE_MESSAGE.to_string()));
        }

        let mut bytes = Vec::new();
        while let Some(chunk) = field
            .chunk()
            .await
            .map_err(|e| map_multipart_error(e, bytes.len(), max_file_size))?
        {
            let size = bytes.len() + chunk.len();
            if size > max_file_size {
                return Err(OcrDocError::PayloadTooLarge {
                    size,
                    limit: max_file_size,
                });
            }
            bytes.extend_from_slice(&chunk);
        }

        if bytes.is_empty() {
            return Err(OcrDocError::Validation("Uploaded file is empty".to_string()));
        }

        let size = bytes.len();
        return Ok(UploadedPayload {
            bytes,
            filename,
            size,
        });
    }
}
