use serde::Deserialize;
use std::env;
use std::path::PathBuf;

use crate::error::{OcrDocError, Result};

/// Default ceiling for uploaded documents (16 MiB).
pub const DEFAULT_MAX_FILE_SIZE: usize = 16 * 1024 * 1024;

pub const DEFAULT_OCR_BASE_URL: &str = "https://api.mistral.ai/v1";
pub const DEFAULT_OCR_MODEL: &str = "mistral-ocr-latest";

fn parse_env_or<T: std::str::FromStr>(var: &str, default: T) -> T
where
    T::Err: std::fmt::Display,
{
    match env::var(var) {
        Ok(val) => match val.parse() {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!("Invalid value '{}' for {}: {}. Using default.", val, var, e);
                default
            }
        },
        Err(_) => default,
    }
}

fn non_empty_env(var: &str) -> Option<String> {
    env::var(var)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub ocr: OcrConfig,
    pub upload: UploadConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Clone, Deserialize)]
pub struct OcrConfig {
    pub model: String,
    pub api_key: String,
    pub base_url: String,
    pub timeout_secs: u64,
    pub include_image_base64: bool,
}

// Keeps the credential out of logs.
impl std::fmt::Debug for OcrConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OcrConfig")
            .field("model", &self.model)
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .field("include_image_base64", &self.include_image_base64)
            .finish()
    }
}

/// Where uploaded documents are held while the OCR request is in flight.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub enum UploadStorage {
    /// Keep the payload in memory (read-only or ephemeral filesystems).
    Memory,
    /// Write the payload to a scoped temporary file inside this directory.
    Directory(PathBuf),
}

#[derive(Debug, Clone, Deserialize)]
pub struct UploadConfig {
    pub max_file_size: usize,
    pub storage: UploadStorage,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            storage: UploadStorage::Memory,
        }
    }
}

fn upload_storage_from_env() -> UploadStorage {
    let dir = || PathBuf::from(env::var("UPLOAD_DIR").unwrap_or_else(|_| "uploads".to_string()));

    match env::var("UPLOAD_STORAGE").map(|v| v.trim().to_lowercase()) {
        Ok(mode) if mode == "memory" => UploadStorage::Memory,
        Ok(mode) if mode == "directory" || mode == "disk" => UploadStorage::Directory(dir()),
        Ok(mode) => {
            tracing::warn!(
                "Invalid value '{}' for UPLOAD_STORAGE (expected memory|directory). Using default.",
                mode
            );
            default_upload_storage(dir())
        }
        Err(_) => default_upload_storage(dir()),
    }
}

// Serverless hosts only offer an ephemeral filesystem.
fn default_upload_storage(dir: PathBuf) -> UploadStorage {
    if env::var("VERCEL").is_ok() {
        UploadStorage::Memory
    } else {
        UploadStorage::Directory(dir)
    }
}

impl Config {
    /// Build the configuration from process environment.
    ///
    /// `MISTRAL_API_KEY` is mandatory; every other setting has a default.
    pub fn from_env() -> Result<Self> {
        let api_key = non_empty_env("MISTRAL_API_KEY").ok_or_else(|| {
            OcrDocError::Config(
                "MISTRAL_API_KEY is required to reach the OCR service".to_string(),
            )
        })?;

        Ok(Self {
            server: ServerConfig {
                host: env::var("OCRDOC_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: parse_env_or("PORT", 8080),
            },
            ocr: OcrConfig {
                model: non_empty_env("OCR_MODEL").unwrap_or_else(|| DEFAULT_OCR_MODEL.to_string()),
                api_key,
                base_url: non_empty_env("OCR_BASE_URL")
                    .unwrap_or_else(|| DEFAULT_OCR_BASE_URL.to_string()),
                timeout_secs: parse_env_or("OCR_TIMEOUT", 120),
                include_image_base64: parse_env_or("OCR_INCLUDE_IMAGES", true),
            },
            upload: UploadConfig {
                max_file_size: parse_env_or("MAX_UPLOAD_SIZE", DEFAULT_MAX_FILE_SIZE),
                storage: upload_storage_from_env(),
            },
        })
    }
}
