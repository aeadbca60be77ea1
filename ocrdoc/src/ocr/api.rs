use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine};
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;
use tracing::debug;

use super::{OcrClient, OcrResponse};
use crate::config::OcrConfig;
use crate::error::{OcrDocError, Result};

const PDF_MIME: &str = "application/pdf";

#[derive(Clone, Debug)]
pub struct MistralOcrClient {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    include_image_base64: bool,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type")]
enum DocumentSource {
    #[serde(rename = "document_url")]
    DocumentUrl { document_url: String },
}

#[derive(Debug, Serialize)]
struct OcrRequest {
    model: String,
    document: DocumentSource,
    include_image_base64: bool,
}

fn pdf_data_url(pdf_bytes: &[u8]) -> String {
    format!("data:{PDF_MIME};base64,{}", STANDARD.encode(pdf_bytes))
}

impl MistralOcrClient {
    pub fn new(config: &OcrConfig) -> Result<Self> {
        if config.api_key.trim().is_empty() {
            return Err(OcrDocError::Config(
                "API key required for Mistral OCR".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| OcrDocError::OcrService(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            include_image_base64: config.include_image_base64,
        })
    }
}

#[async_trait]
impl OcrClient for MistralOcrClient {
    async fn process_pdf(&self, pdf_bytes: &[u8]) -> Result<OcrResponse> {
        let request = OcrRequest {
            model: self.model.clone(),
            document: DocumentSource::DocumentUrl {
                document_url: pdf_data_url(pdf_bytes),
            },
            include_image_base64: self.include_image_base64,
        };

        debug!(
            model = %self.model,
            bytes = pdf_bytes.len(),
            "Sending document to Mistral OCR"
        );

        let resp = self
            .client
            .post(format!("{}/ocr", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| OcrDocError::OcrService(format!("API request failed: {e}")))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(OcrDocError::OcrService(format!(
                "API request failed: {status} - {body}"
            )));
        }

        resp.json::<OcrResponse>()
            .await
            .map_err(|e| OcrDocError::OcrService(format!("Failed to parse response: {e}")))
    }
}
