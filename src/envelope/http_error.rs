//! Structured error payload returned by handlers.

use std::collections::BTreeMap;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A structured error body.
///
/// Handlers return it together with a status code:
///
/// ```rust,ignore
/// return (StatusCode::NOT_FOUND, HttpError::new("not found")).into_response();
/// ```
///
/// Rendering serializes it as JSON and also stores a copy in the response
/// extensions, which is where the error normalization middleware looks first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpError {
    /// Human-readable message. Required for the payload to be recognised.
    #[serde(alias = "Message")]
    pub message: String,

    /// Additional detail, usually meant for developers.
    #[serde(default, alias = "MessageDetail", skip_serializing_if = "Option::is_none")]
    pub message_detail: Option<String>,

    /// Per-field validation failures.
    #[serde(default, alias = "ModelState", skip_serializing_if = "Option::is_none")]
    pub model_state: Option<BTreeMap<String, Vec<String>>>,
}

impl HttpError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            message_detail: None,
            model_state: None,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.message_detail = Some(detail.into());
        self
    }

    /// Record a validation failure for `field`. Repeated calls accumulate.
    pub fn with_field_error(mut self, field: impl Into<String>, error: impl Into<String>) -> Self {
        self.model_state
            .get_or_insert_with(BTreeMap::new)
            .entry(field.into())
            .or_default()
            .push(error.into());
        self
    }

    /// Parse a JSON body. Anything that is not an object with a string
    /// `message` yields `None`.
    pub fn from_json(bytes: &[u8]) -> Option<Self> {
        match serde_json::from_slice::<Value>(bytes).ok()? {
            value @ Value::Object(_) => serde_json::from_value(value).ok(),
            _ => None,
        }
    }
}

/// Renders as a 500; pair it with a status code to pick another one.
impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let mut response = (StatusCode::INTERNAL_SERVER_ERROR, Json(&self)).into_response();
        response.extensions_mut().insert(self);
        response
    }
}
