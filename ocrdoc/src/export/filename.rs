const SOURCE_EXTENSION: &str = ".pdf";
const CONTAINER_EXTENSION: &str = ".docx";
const RESULT_SUFFIX: &str = "_ocr_result";
const FALLBACK_STEM: &str = "document";

fn strip_suffix_ignore_case<'a>(name: &'a str, suffix: &str) -> Option<&'a str> {
    let split = name.len().checked_sub(suffix.len())?;
    if !name.is_char_boundary(split) {
        return None;
    }
    let (stem, tail) = name.split_at(split);
    tail.eq_ignore_ascii_case(suffix).then_some(stem)
}

/// Derive the attachment name for an exported document.
///
/// `report.pdf` becomes `report_ocr_result.docx`. The `.docx` extension
/// always appears exactly once.
pub fn download_filename(filename: &str) -> String {
    let name = filename.trim();
    let name = strip_suffix_ignore_case(name, SOURCE_EXTENSION).unwrap_or(name);
    let name = strip_suffix_ignore_case(name, CONTAINER_EXTENSION).unwrap_or(name);

    let stem: String = name
        .chars()
        .filter(|c| !c.is_control() && !matches!(c, '"' | '\\' | '/'))
        .collect();
    let stem = stem.trim();
    let stem = if stem.is_empty() { FALLBACK_STEM } else { stem };

    format!("{stem}{RESULT_SUFFIX}{CONTAINER_EXTENSION}")
}

/// `Content-Disposition` value for an attachment download.
///
/// Non-ASCII names are carried in the RFC 5987 `filename*` parameter with an
/// ASCII fallback in `filename`.
pub fn content_disposition(filename: &str) -> String {
    let ascii: String = filename
        .chars()
        .map(|c| if c.is_ascii() { c } else { '_' })
        .collect();

    if ascii == filename {
        return format!("attachment; filename=\"{filename}\"");
    }

    let encoded: String = filename
        .bytes()
        .map(|b| match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'.' | b'-' | b'_' => (b as char).to_string(),
            _ => format!("%{b:02X}"),
        })
        .collect();

    format!("attachment; filename=\"{ascii}\"; filename*=UTF-8''{encoded}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pdf_extension_is_replaced() {
        assert_eq!(download_filename("report.pdf"), "report_ocr_result.docx");
        assert_eq!(download_filename("Scan.PDF"), "Scan_ocr_result.docx");
    }

    #[test]
    fn test_container_extension_appears_once() {
        assert_eq!(download_filename("notes.docx"), "notes_ocr_result.docx");
        assert_eq!(download_filename("notes.pdf.docx"), "notes.pdf_ocr_result.docx");
    }

    #[test]
    fn test_name_without_extension() {
        assert_eq!(download_filename("invoice"), "invoice_ocr_result.docx");
    }

    #[test]
    fn test_empty_name_falls_back() {
        assert_eq!(download_filename(""), "document_ocr_result.docx");
        assert_eq!(download_filename(".pdf"), "document_ocr_result.docx");
    }

    #[test]
    fn test_header_breaking_characters_removed() {
        assert_eq!(
            download_filename("we\"ird\r\nname.pdf"),
            "weirdname_ocr_result.docx"
        );
    }

    #[test]
    fn test_content_disposition_ascii() {
        assert_eq!(
            content_disposition("a_ocr_result.docx"),
            "attachment; filename=\"a_ocr_result.docx\""
        );
    }

    #[test]
    fn test_content_disposition_non_ascii() {
        let header = content_disposition("résumé.docx");
        assert!(header.starts_with("attachment; filename=\"r_sum_.docx\""));
        assert!(header.contains("filename*=UTF-8''r%C3%A9sum%C3%A9.docx"));
    }
}
