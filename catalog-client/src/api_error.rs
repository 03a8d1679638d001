//! Translation of non-2xx response bodies into caller-visible error text.
//!
//! The catalog API answers failures with a Spring-style envelope. Only the
//! top-level `message` and the field-level validation errors are surfaced;
//! everything else is decoded so that a body of the wrong shape is detected.

use crate::error::{ClientError, ClientResult};
use serde::Deserialize;
use serde_json::Value;

/// Some serializers append the offending input after this marker.
const NOISE_MARKER: &str = "at [Source:";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ApiErrorBody {
    pub timestamp: String,
    pub status: i32,
    pub message: String,
    pub error: String,
    #[serde(rename = "errors")]
    pub validation_errors: Vec<ValidationError>,
    pub path: String
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ValidationError {
    pub codes: Vec<String>,
    pub default_message: String,
    pub object_name: String,
    pub field: String,
    pub rejected_value: Value,
    pub binding_failure: bool,
    pub code: String
}

impl ValidationError {
    fn rejected_value_text(&self) -> String {
        match &self.rejected_value {
            Value::Null => String::new(),
            Value::String(s) => s.clone(),
            other => other.to_string()
        }
    }
}

impl ApiErrorBody {
    pub fn parse(body: &[u8]) -> ClientResult<Self> {
        serde_json::from_slice(body).map_err(|_| ClientError::Malformed)
    }

    pub fn to_message(&self) -> String {
        let mut msg = self
            .message
            .split(NOISE_MARKER)
            .next()
            .unwrap_or_default()
            .to_string();

        if !self.validation_errors.is_empty() {
            let details: Vec<String> = self
                .validation_errors
                .iter()
                .map(|ve| format!("{}: \"{}\"", ve.default_message, ve.rejected_value_text()))
                .collect();
            msg.push_str(", Errors: [");
            msg.push_str(&details.join(", "));
            msg.push(']');
        }

        msg.trim().to_string()
    }
}

/// Turns an error response body into a single message.
///
/// Fails with [`ClientError::Malformed`] when the body is not the expected
/// error envelope (HTML error pages, empty bodies, bare literals).
pub fn translate_error_body(body: &[u8]) -> ClientResult<String> {
    ApiErrorBody::parse(body).map(|envelope| envelope.to_message())
}
