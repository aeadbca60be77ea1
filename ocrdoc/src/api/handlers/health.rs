use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::api::state::AppState;
use crate::config::UploadStorage;

/// Service health, OCR backend and staging mode.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct HealthData {
    pub status: String,
    pub version: String,
    pub ocr: OcrStatus,
    pub upload: UploadStatus,
}

#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct OcrStatus {
    pub provider: String,
    pub model: String,
}

#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct UploadStatus {
    pub storage: String,
    pub max_file_size: usize,
}

/// `GET /health`
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service health status", body = HealthData),
    )
)]
pub async fn health_check(State(state): State<AppState>) -> Json<HealthData> {
    let storage = match &state.config.upload.storage {
        UploadStorage::Memory => "memory",
        UploadStorage::Directory(_) => "directory",
    };

    Json(HealthData {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        ocr: OcrStatus {
            provider: "mistral".to_string(),
            model: state.ocr.model().to_string(),
        },
        upload: UploadStatus {
            storage: storage.to_string(),
            max_file_size: state.config.upload.max_file_size,
        },
    })
}
