//! DOCX rendering of a [`RichDocument`].
//!
//! Every export has the same frame: a title heading, a metadata paragraph
//! naming the source file, and a separator line, followed by the body.

use std::io::Cursor;

use docx_rs::{BreakType, Docx, Paragraph, Style, StyleType};

use super::markdown::{Block, RichDocument, Run};
use crate::error::{OcrDocError, Result};

pub const DOCUMENT_TITLE: &str = "OCR Extraction Result";
pub const PRODUCT_NAME: &str = "ocrdoc";
pub const SEPARATOR: &str = "──────────────────────────────────────────────────";

const TITLE_STYLE: &str = "Title";
const MAX_HEADING_STYLE: usize = 9;

// Half-point sizes, largest first.
const HEADING_SIZES: [usize; MAX_HEADING_STYLE] = [32, 28, 26, 24, 24, 22, 22, 22, 22];

fn heading_style_id(level: usize) -> String {
    format!("Heading{}", level.clamp(1, MAX_HEADING_STYLE))
}

fn with_styles(docx: Docx) -> Docx {
    let title = Style::new(TITLE_STYLE, StyleType::Paragraph)
        .name("Title")
        .size(48)
        .bold();

    (1..=MAX_HEADING_STYLE).fold(docx.add_style(title), |docx, level| {
        docx.add_style(
            Style::new(heading_style_id(level), StyleType::Paragraph)
                .name(format!("Heading {level}"))
                .size(HEADING_SIZES[level - 1])
                .bold(),
        )
    })
}

/// Line terminators inside run text become DOCX line breaks.
fn to_docx_run(run: &Run) -> docx_rs::Run {
    let mut out = docx_rs::Run::new();
    for (i, piece) in run.text.split('\n').enumerate() {
        if i > 0 {
            out = out.add_break(BreakType::TextWrapping);
        }
        if !piece.is_empty() {
            out = out.add_text(piece);
        }
    }
    if run.bold {
        out = out.bold();
    }
    out
}

fn to_docx_paragraph(block: &Block) -> Paragraph {
    match block {
        Block::Heading { level, text } => Paragraph::new()
            .add_run(docx_rs::Run::new().add_text(text))
            .style(&heading_style_id(*level)),
        Block::Paragraph { runs } => runs
            .iter()
            .fold(Paragraph::new(), |p, run| p.add_run(to_docx_run(run))),
    }
}

fn metadata_paragraph(source_filename: &str) -> Paragraph {
    Paragraph::new()
        .add_run(docx_rs::Run::new().add_text("Source file: "))
        .add_run(docx_rs::Run::new().add_text(source_filename))
        .add_run(docx_rs::Run::new().add_text(" | Processed by "))
        .add_run(docx_rs::Run::new().add_text(PRODUCT_NAME).bold())
}

/// Assemble the full document: title, metadata, separator, then `body`.
pub fn build_docx(body: &RichDocument, source_filename: &str) -> Docx {
    let docx = with_styles(Docx::new())
        .add_paragraph(
            Paragraph::new()
                .add_run(docx_rs::Run::new().add_text(DOCUMENT_TITLE))
                .style(TITLE_STYLE),
        )
        .add_paragraph(metadata_paragraph(source_filename))
        .add_paragraph(Paragraph::new().add_run(docx_rs::Run::new().add_text(SEPARATOR)));

    body.blocks
        .iter()
        .fold(docx, |docx, block| docx.add_paragraph(to_docx_paragraph(block)))
}

/// Render and pack the document into an in-memory DOCX container.
pub fn render_docx(body: &RichDocument, source_filename: &str) -> Result<Vec<u8>> {
    let mut buffer = Cursor::new(Vec::new());
    build_docx(body, source_filename)
        .build()
        .pack(&mut buffer)
        .map_err(|e| OcrDocError::Export(format!("Failed to pack DOCX: {e}")))?;

    tracing::debug!(
        blocks = body.blocks.len(),
        bytes = buffer.get_ref().len(),
        "DOCX rendered"
    );

    Ok(buffer.into_inner())
}
