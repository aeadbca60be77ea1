use axum::extract::rejection::JsonRejection;
use axum::extract::FromRequest;
use axum::http::StatusCode;

use crate::error::OcrDocError;

/// `axum::Json` whose rejections render as `{ "error": ... }` bodies.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(OcrDocError))]
pub struct AppJson<T>(pub T);

impl From<JsonRejection> for OcrDocError {
    fn from(rejection: JsonRejection) -> Self {
        let message = match rejection {
            JsonRejection::MissingJsonContentType(_) => {
                "Request body must be JSON (`Content-Type: application/json`)".to_string()
            }
            JsonRejection::JsonSyntaxError(_) => "Request body is not valid JSON".to_string(),
            JsonRejection::JsonDataError(err) => describe_data_error(&err.body_text()),
            other if other.status() == StatusCode::PAYLOAD_TOO_LARGE => {
                "Request body too large".to_string()
            }
            other => other.body_text(),
        };
        OcrDocError::Validation(message)
    }
}

/// Turn a serde data error into the message shown to the caller.
///
/// A missing `text` field is reported the same way as an empty one.
fn describe_data_error(detail: &str) -> String {
    match missing_field(detail) {
        Some("text") => "No text provided".to_string(),
        Some(field) => format!("Missing required field: {field}"),
        None => format!("Invalid request body: {detail}"),
    }
}

fn missing_field(detail: &str) -> Option<&str> {
    let (_, rest) = detail.split_once("missing field `")?;
    rest.split_once('`').map(|(field, _)| field)
}
