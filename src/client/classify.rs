//! Response classifier
//!
//! Decides whether a response is the expected success or an API error.
//! Error bodies come in several shapes; parsing them must never fail the
//! classification itself, so anything unparseable degrades to an error
//! that carries the raw body.

use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::Value;

use super::http::{sanitize_for_log, RawResponse};
use crate::error::{ApiError, FieldError};

/// Known error envelope
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ErrorEnvelope {
    message: String,
    #[serde(default)]
    data: Option<ErrorData>,
    #[serde(default, alias = "trace_id")]
    trace_id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ErrorData {
    Text(String),
    Fields(Vec<FieldError>),
    Other(Value),
}

/// Return the response untouched when its status is `expected`, otherwise an [`ApiError`]
pub fn classify(
    response: RawResponse,
    expected: StatusCode,
) -> std::result::Result<RawResponse, ApiError> {
    if response.status == expected {
        return Ok(response);
    }

    let text = response.text();
    tracing::error!(
        "API error: {} (expected {}) - {}",
        response.status,
        expected,
        sanitize_for_log(&text)
    );

    Err(parse_error_body(response.status, &text))
}

fn parse_error_body(status: StatusCode, text: &str) -> ApiError {
    match serde_json::from_str::<ErrorEnvelope>(text) {
        Ok(envelope) => {
            let (detail, field_errors) = match envelope.data {
                Some(ErrorData::Text(s)) if !s.is_empty() => (Some(s), Vec::new()),
                Some(ErrorData::Fields(fields)) => (None, fields),
                _ => (None, Vec::new()),
            };
            ApiError {
                status,
                message: envelope.message,
                detail,
                field_errors,
                trace_id: envelope.trace_id,
                raw_body: None,
            }
        }
        Err(e) => ApiError {
            status,
            message: e.to_string(),
            detail: None,
            field_errors: Vec::new(),
            trace_id: None,
            raw_body: Some(text.to_string()),
        },
    }
}
