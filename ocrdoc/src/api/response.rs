//! Wire shapes shared by the HTTP handlers.

use serde::{Deserialize, Serialize};

/// Body of every error response.
///
/// ```json
/// { "error": "Invalid file type. Please upload a PDF file.", "code": 400 }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ErrorBody {
    /// Human-readable description of what went wrong.
    pub error: String,
    /// HTTP status code, repeated for clients that only see the body.
    pub code: u16,
}

/// Successful `POST /upload` result.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct UploadResponse {
    pub success: bool,
    /// Extracted markdown, pages separated by blank lines.
    pub result: String,
    /// Original name of the uploaded file.
    pub filename: String,
}
