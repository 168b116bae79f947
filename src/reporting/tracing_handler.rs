//! Error handler that reports through `tracing`.

use async_trait::async_trait;
use axum::{http::StatusCode, BoxError};

use crate::envelope::{ErrorId, HttpError};
use crate::http::RequestContext;
use crate::reporting::ErrorHandler;

/// Emits one structured warning per reported error.
///
/// The returned id is logged alongside the error so support can grep for the
/// value a client got back.
#[derive(Debug, Clone)]
pub struct TracingErrorHandler {
    assign_ids: bool,
}

impl TracingErrorHandler {
    pub fn new(assign_ids: bool) -> Self {
        Self { assign_ids }
    }
}

impl Default for TracingErrorHandler {
    fn default() -> Self {
        Self::new(true)
    }
}

#[async_trait]
impl ErrorHandler for TracingErrorHandler {
    async fn log_error(
        &self,
        ctx: &RequestContext,
        status: StatusCode,
        error: &HttpError,
    ) -> Result<ErrorId, BoxError> {
        let error_id = if self.assign_ids {
            ErrorId::new_v4()
        } else {
            ErrorId::EMPTY
        };

        tracing::warn!(
            error_id = %error_id,
            request_id = ctx.request_id().unwrap_or("unknown"),
            method = %ctx.method(),
            path = %ctx.uri().path(),
            status = status.as_u16(),
            message = %error.message,
            detail = error.message_detail.as_deref().unwrap_or(""),
            invalid_fields = error.model_state.as_ref().map_or(0, |state| state.len()),
            "Request failed"
        );

        Ok(error_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::Request};

    fn context() -> RequestContext {
        RequestContext::from_request(&Request::get("/items/7").body(Body::empty()).unwrap())
    }

    #[tokio::test]
    async fn test_assigns_fresh_ids() {
        let handler = TracingErrorHandler::default();
        let error = HttpError::new("not found");

        let first = handler.log_error(&context(), StatusCode::NOT_FOUND, &error).await.unwrap();
        let second = handler.log_error(&context(), StatusCode::NOT_FOUND, &error).await.unwrap();

        assert!(!first.is_empty());
        assert_ne!(first, second);
    }

    #[tokio::test]
    async fn test_without_ids() {
        let handler = TracingErrorHandler::new(false);
        let id = handler
            .log_error(&context(), StatusCode::BAD_REQUEST, &HttpError::new("bad"))
            .await
            .unwrap();

        assert!(id.is_empty());
    }
}
