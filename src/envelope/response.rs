//! Normalized error envelope.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::envelope::ErrorId;

/// What the client receives in place of a reported [`HttpError`](crate::envelope::HttpError).
///
/// ```json
/// { "statusCode": 404, "message": "not found", "errorId": "…" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiErrorResponse {
    pub status_code: u16,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_id: Option<String>,
}

impl ApiErrorResponse {
    pub fn new(status: StatusCode, message: impl Into<String>, error_id: ErrorId) -> Self {
        Self {
            status_code: status.as_u16(),
            message: message.into(),
            error_id: error_id.to_envelope_field(),
        }
    }

    pub fn status(&self) -> StatusCode {
        StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status(), Json(self)).into_response()
    }
}
