//! OCR (Optical Character Recognition) Module
//!
//! Text extraction is delegated to a remote document-OCR service. The module
//! follows a provider pattern:
//! - [`OcrClient`] is the transport seam (one remote call per document)
//! - [`MistralOcrClient`] implements it against the Mistral OCR API
//! - [`OcrProvider`] wraps a client, bounds the call with a timeout, and
//!   joins the returned pages into one markdown string
//!
//! # Configuration
//!
//! Controlled via `OcrConfig` (see `config.rs`):
//! - `api_key`: required bearer credential
//! - `base_url`: API root, override for proxies or tests
//! - `model`: OCR model identifier
//! - `timeout_secs`: upper bound on a single OCR call
//!
//! # Usage
//!
//! ```rust,ignore
//! let ocr = OcrProvider::new(&config.ocr)?;
//! let markdown = ocr.extract_text(&pdf_bytes).await?;
//! ```

mod api;
mod provider;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

pub use api::MistralOcrClient;
pub use provider::{join_pages, OcrProvider};

/// One page of OCR output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OcrPage {
    #[serde(default)]
    pub index: u32,
    pub markdown: String,
}

/// Ordered pages returned by the OCR service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OcrResponse {
    pub pages: Vec<OcrPage>,
    #[serde(default)]
    pub model: Option<String>,
}

impl OcrResponse {
    pub fn from_pages<I, S>(pages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            pages: pages
                .into_iter()
                .enumerate()
                .map(|(index, markdown)| OcrPage {
                    index: index as u32,
                    markdown: markdown.into(),
                })
                .collect(),
            model: None,
        }
    }
}

/// A remote OCR backend. Implementations perform exactly one request per
/// call and never retry.
#[async_trait]
pub trait OcrClient: Send + Sync {
    async fn process_pdf(&self, pdf_bytes: &[u8]) -> Result<OcrResponse>;
}
