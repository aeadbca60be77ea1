use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use docx_rs::{read_docx, DocumentChild, ParagraphChild, RunChild};
use pretty_assertions::assert_eq;
use tower::ServiceExt;

mod common;
use common::{body_bytes, body_json, memory_upload, test_app, MockOcr};

use ocrdoc::config::DEFAULT_MAX_FILE_SIZE;
use ocrdoc::export::DOCX_CONTENT_TYPE;

fn download_request(json: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/download-docx")
        .header("content-type", "application/json")
        .body(Body::from(json.to_string()))
        .unwrap()
}

fn app() -> axum::Router {
    test_app(memory_upload(DEFAULT_MAX_FILE_SIZE), MockOcr::returning(&[]))
}

/// Concatenate the visible text of every paragraph in a DOCX package.
fn docx_paragraph_texts(bytes: &[u8]) -> Vec<String> {
    let docx = read_docx(bytes).unwrap();
    docx.document
        .children
        .iter()
        .filter_map(|child| match child {
            DocumentChild::Paragraph(p) => {
                let mut text = String::new();
                for pc in &p.children {
                    if let ParagraphChild::Run(run) = pc {
                        for rc in &run.children {
                            if let RunChild::Text(t) = rc {
                                text.push_str(&t.text);
                            }
                        }
                    }
                }
                Some(text)
            }
            _ => None,
        })
        .collect()
}

#[tokio::test]
async fn test_download_docx_returns_attachment() {
    let response = app()
        .oneshot(download_request(
            r##"{"text":"# Report\n\nSome **bold** text","filename":"report.pdf"}"##,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        DOCX_CONTENT_TYPE
    );
    let disposition = response.headers()[header::CONTENT_DISPOSITION]
        .to_str()
        .unwrap()
        .to_string();
    assert!(disposition.starts_with("attachment;"));
    assert!(disposition.contains("report_ocr_result.docx"));

    let bytes = body_bytes(response).await;
    // DOCX is a zip container
    assert_eq!(&bytes[..2], b"PK");

    let texts = docx_paragraph_texts(&bytes);
    assert!(texts.iter().any(|t| t == "OCR Extraction Result"));
    assert!(texts.iter().any(|t| t.contains("Source file: report.pdf")));
    assert!(texts.iter().any(|t| t == "Report"));
    assert!(texts.iter().any(|t| t.contains("Some bold text")));
}

#[tokio::test]
async fn test_download_without_filename_uses_fallback() {
    let response = app()
        .oneshot(download_request(r#"{"text":"hello"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let disposition = response.headers()[header::CONTENT_DISPOSITION]
        .to_str()
        .unwrap()
        .to_string();
    assert!(disposition.contains("document_ocr_result.docx"));

    let texts = docx_paragraph_texts(&body_bytes(response).await);
    assert!(texts.iter().any(|t| t.contains("Source file: unknown")));
}

#[tokio::test]
async fn test_download_empty_text_is_rejected() {
    let response = app()
        .oneshot(download_request(r#"{"text":"","filename":"a.pdf"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "No text provided");
    assert_eq!(json["code"], 400);
}

#[tokio::test]
async fn test_download_missing_text_is_rejected() {
    let response = app()
        .oneshot(download_request(r#"{"filename":"a.pdf"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "No text provided");
}

#[tokio::test]
async fn test_download_malformed_json_is_rejected() {
    let response = app()
        .oneshot(download_request("{not json"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Request body is not valid JSON");
}

#[tokio::test]
async fn test_download_without_json_content_type_is_rejected() {
    let response = app()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/download-docx")
                .body(Body::from(r#"{"text":"hello"}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(
        json["error"],
        "Request body must be JSON (`Content-Type: application/json`)"
    );
}

#[tokio::test]
async fn test_download_indented_marker_stays_body_text() {
    let response = app()
        .oneshot(download_request(
            r##"{"text":"  # not a heading
    indented","filename":"a.pdf"}"##,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let texts = docx_paragraph_texts(&body_bytes(response).await);
    assert!(texts.iter().any(|t| t.contains("# not a heading")));
    assert!(!texts.iter().any(|t| t == "not a heading"));
}
