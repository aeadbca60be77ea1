// Common test utilities for integration tests
#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Once};
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::Request;
use axum::Router;

use ocrdoc::api::{create_router, AppState};
use ocrdoc::config::{
    Config, OcrConfig, ServerConfig, UploadConfig, UploadStorage, DEFAULT_OCR_BASE_URL,
    DEFAULT_OCR_MODEL,
};
use ocrdoc::error::{OcrDocError, Result};
use ocrdoc::ocr::{OcrClient, OcrProvider, OcrResponse};

static INIT: Once = Once::new();

/// Initialize tracing subscriber once for tests
pub fn init_test_logger() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .try_init();
    });
}

pub const BOUNDARY: &str = "ocrdoc-test-boundary";

/// OCR double that records how often it was called.
pub struct MockOcr {
    pages: Option<Vec<String>>,
    calls: AtomicUsize,
}

impl MockOcr {
    pub fn returning(pages: &[&str]) -> Arc<Self> {
        Arc::new(Self {
            pages: Some(pages.iter().map(|p| p.to_string()).collect()),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            pages: None,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl OcrClient for MockOcr {
    async fn process_pdf(&self, _pdf_bytes: &[u8]) -> Result<OcrResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.pages {
            Some(pages) => Ok(OcrResponse::from_pages(pages.clone())),
            None => Err(OcrDocError::OcrService(
                "API request failed: 401 Unauthorized - invalid api key".to_string(),
            )),
        }
    }
}

pub fn test_config(upload: UploadConfig) -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 8080,
        },
        ocr: OcrConfig {
            model: DEFAULT_OCR_MODEL.to_string(),
            api_key: "test-api-key".to_string(),
            base_url: DEFAULT_OCR_BASE_URL.to_string(),
            timeout_secs: 10,
            include_image_base64: true,
        },
        upload,
    }
}

pub fn memory_upload(max_file_size: usize) -> UploadConfig {
    UploadConfig {
        max_file_size,
        storage: UploadStorage::Memory,
    }
}

pub fn test_app(upload: UploadConfig, client: Arc<MockOcr>) -> Router {
    init_test_logger();
    let ocr = OcrProvider::with_client(
        client,
        DEFAULT_OCR_MODEL.to_string(),
        Duration::from_secs(10),
    );
    create_router(AppState::new(test_config(upload), ocr))
}

/// Build a `multipart/form-data` body with a single file part.
pub fn multipart_body(field: &str, filename: &str, content: &[u8]) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"{field}\"; filename=\"{filename}\"\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(b"Content-Type: application/pdf\r\n\r\n");
    body.extend_from_slice(content);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
    body
}

/// Multipart body with only a plain text field.
pub fn multipart_text_body(field: &str, value: &str) -> Vec<u8> {
    format!(
        "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{field}\"\r\n\r\n{value}\r\n--{BOUNDARY}--\r\n"
    )
    .into_bytes()
}

pub fn upload_request(body: Vec<u8>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/upload")
        .header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

pub async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn body_bytes(response: axum::response::Response) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}
