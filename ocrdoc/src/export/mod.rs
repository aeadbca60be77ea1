//! Markdown to DOCX export.
//!
//! OCR output is first converted into a [`RichDocument`] by a line-oriented
//! state machine ([`markdown_to_rich`]), then rendered into a DOCX container
//! with a fixed title/metadata frame ([`render_docx`]).

mod docx;
mod filename;
mod markdown;

pub use docx::{build_docx, render_docx, DOCUMENT_TITLE, PRODUCT_NAME, SEPARATOR};
pub use filename::{content_disposition, download_filename};
pub use markdown::{markdown_to_rich, Block, RichDocument, Run};

pub const DOCX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
