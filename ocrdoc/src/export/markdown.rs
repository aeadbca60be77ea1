//! Line-oriented markdown to rich-text conversion.
//!
//! Only three constructs are recognised: `#` headings, `**` bold runs and
//! blank-line paragraph breaks. Everything else (lists, links, tables, code
//! fences, nested emphasis) passes through as plain text. The transform never
//! fails: unbalanced `**` markers still alternate plain/bold by segment parity.

use serde::Serialize;

const HEADING_MARKER: char = '#';
const BOLD_MARKER: &str = "**";
const LINE_TERMINATOR: &str = "\n";

/// A span of paragraph text sharing one formatting attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Run {
    pub text: String,
    pub bold: bool,
}

impl Run {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bold: false,
        }
    }

    pub fn bold(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bold: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    Heading { level: usize, text: String },
    Paragraph { runs: Vec<Run> },
}

/// Structured document body prior to DOCX serialization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RichDocument {
    pub blocks: Vec<Block>,
}

impl RichDocument {
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum ParagraphState {
    NoOpenParagraph,
    /// Runs of the paragraph currently being built.
    OpenParagraph(Vec<Run>),
}

#[derive(Debug, PartialEq, Eq)]
enum LineKind<'a> {
    Heading { level: usize, text: &'a str },
    Blank,
    Bold(&'a str),
    Plain(&'a str),
}

fn classify(line: &str) -> LineKind<'_> {
    if line.trim().is_empty() {
        return LineKind::Blank;
    }

    if line.starts_with(HEADING_MARKER) {
        let rest = line.trim_start_matches(HEADING_MARKER);
        // '#' is one byte, so the byte difference is the marker count
        let level = line.len() - rest.len();
        return LineKind::Heading {
            level,
            text: rest.trim(),
        };
    }

    if line.contains(BOLD_MARKER) {
        LineKind::Bold(line)
    } else {
        LineKind::Plain(line)
    }
}

struct Transformer {
    doc: RichDocument,
    state: ParagraphState,
}

impl Transformer {
    fn new() -> Self {
        Self {
            doc: RichDocument::default(),
            state: ParagraphState::NoOpenParagraph,
        }
    }

    fn close_paragraph(&mut self) {
        let state = std::mem::replace(&mut self.state, ParagraphState::NoOpenParagraph);
        if let ParagraphState::OpenParagraph(runs) = state {
            self.doc.blocks.push(Block::Paragraph { runs });
        }
    }

    fn append(&mut self, new_runs: impl IntoIterator<Item = Run>) {
        match &mut self.state {
            ParagraphState::OpenParagraph(runs) => runs.extend(new_runs),
            ParagraphState::NoOpenParagraph => {
                self.state = ParagraphState::OpenParagraph(new_runs.into_iter().collect());
            }
        }
    }

    fn feed(&mut self, line: &str) {
        match classify(line) {
            LineKind::Heading { level, text } => {
                self.close_paragraph();
                if !text.is_empty() {
                    self.doc.blocks.push(Block::Heading {
                        level,
                        text: text.to_string(),
                    });
                }
            }
            LineKind::Blank => self.close_paragraph(),
            LineKind::Bold(line) => {
                let segments = line.split(BOLD_MARKER).enumerate().map(|(i, segment)| Run {
                    text: segment.to_string(),
                    bold: i % 2 == 1,
                });
                self.append(segments.chain(std::iter::once(Run::plain(LINE_TERMINATOR))));
            }
            LineKind::Plain(line) => {
                self.append([Run::plain(format!("{line}{LINE_TERMINATOR}"))]);
            }
        }
    }

    // A trailing paragraph without a closing blank line is kept.
    fn finish(mut self) -> RichDocument {
        self.close_paragraph();
        self.doc
    }
}

/// Convert OCR markdown into a [`RichDocument`].
pub fn markdown_to_rich(text: &str) -> RichDocument {
    let mut transformer = Transformer::new();
    for line in text.lines() {
        transformer.feed(line);
    }
    transformer.finish()
}
