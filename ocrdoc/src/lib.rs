pub mod api;
pub mod config;
pub mod error;
pub mod export;
pub mod ocr;
pub mod upload;
