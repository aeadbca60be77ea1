use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::api::response::ErrorBody;

#[derive(Error, Debug)]
pub enum OcrDocError {
    #[error("{0}")]
    Validation(String),

    #[error("File too large: {size} bytes (max {limit} bytes)")]
    PayloadTooLarge { size: usize, limit: usize },

    #[error("OCR processing failed: {0}")]
    OcrService(String),

    #[error("DOCX export failed: {0}")]
    Export(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl OcrDocError {
    pub fn status(&self) -> StatusCode {
        match self {
            OcrDocError::Validation(_) | OcrDocError::PayloadTooLarge { .. } => {
                StatusCode::BAD_REQUEST
            }
            OcrDocError::OcrService(_)
            | OcrDocError::Export(_)
            | OcrDocError::Config(_)
            | OcrDocError::Io(_)
            | OcrDocError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for OcrDocError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        } else {
            tracing::warn!(error = %self, "Request rejected");
        }

        let body = Json(ErrorBody {
            error: self.to_string(),
            code: status.as_u16(),
        });

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, OcrDocError>;
