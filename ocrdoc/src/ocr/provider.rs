use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use super::{MistralOcrClient, OcrClient, OcrPage};
use crate::config::OcrConfig;
use crate::error::{OcrDocError, Result};

const PAGE_SEPARATOR: &str = "\n\n";

/// Concatenate page markdown in order, separated by blank lines, trimmed.
pub fn join_pages(pages: &[OcrPage]) -> String {
    let mut full_text = String::new();
    for page in pages {
        full_text.push_str(&page.markdown);
        full_text.push_str(PAGE_SEPARATOR);
    }
    full_text.trim().to_string()
}

#[derive(Clone)]
pub struct OcrProvider {
    client: Arc<dyn OcrClient>,
    model: String,
    timeout: Duration,
}

impl OcrProvider {
    pub fn new(config: &OcrConfig) -> Result<Self> {
        let client = MistralOcrClient::new(config)?;
        info!(model = %config.model, "Mistral OCR API backend initialized");
        Ok(Self::with_client(
            Arc::new(client),
            config.model.clone(),
            Duration::from_secs(config.timeout_secs),
        ))
    }

    /// Build a provider around any [`OcrClient`], e.g. a test double.
    pub fn with_client(client: Arc<dyn OcrClient>, model: String, timeout: Duration) -> Self {
        Self {
            client,
            model,
            timeout,
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Run OCR on a PDF and return its text as one markdown string.
    pub async fn extract_text(&self, pdf_bytes: &[u8]) -> Result<String> {
        let response = tokio::time::timeout(self.timeout, self.client.process_pdf(pdf_bytes))
            .await
            .map_err(|_| {
                OcrDocError::OcrService(format!(
                    "OCR operation timed out after {:?}",
                    self.timeout
                ))
            })??;

        info!(pages = response.pages.len(), "OCR completed");
        Ok(join_pages(&response.pages))
    }
}
