//! Response normalization decision procedure.

use std::fmt;
use std::sync::Arc;

use axum::{
    body::{Body, HttpBody},
    http::{header::CONTENT_TYPE, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    BoxError,
};

use thiserror::Error;

use crate::envelope::{ApiErrorResponse, HttpError};
use crate::http::middleware::ErrorNormalizationLayer;
use crate::http::RequestContext;
use crate::observability::metrics;
use crate::reporting::ErrorHandler;

/// Replacement for the default procedure. Receives every response and decides
/// its final shape on its own.
pub type ResponseOverride = Arc<dyn Fn(&RequestContext, Response) -> Response + Send + Sync>;

/// Error returned when a [`ResponseNormalizer`] cannot be assembled.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BuildError {
    #[error("an error handler is required")]
    MissingErrorHandler,
    #[error("max inspected body size must be greater than zero")]
    ZeroInspectionLimit,
}

/// What happened to a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The registered override produced the response.
    Overridden,
    /// 500 responses are left alone.
    ServerError,
    /// No structured error payload was found.
    PassedThrough,
    /// Reported and replaced by an envelope.
    Normalized,
}

impl Outcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Overridden => "overridden",
            Outcome::ServerError => "server_error",
            Outcome::PassedThrough => "passed_through",
            Outcome::Normalized => "normalized",
        }
    }
}

/// Turns responses carrying an [`HttpError`] into [`ApiErrorResponse`]
/// envelopes, reporting each one through the configured [`ErrorHandler`].
///
/// Immutable once built; share it behind an `Arc`.
#[derive(Clone)]
pub struct ResponseNormalizer {
    handler: Arc<dyn ErrorHandler>,
    on_response: Option<ResponseOverride>,
    max_inspected_body_bytes: Option<usize>,
}

impl ResponseNormalizer {
    pub fn new(handler: impl ErrorHandler + 'static) -> Self {
        Self {
            handler: Arc::new(handler),
            on_response: None,
            max_inspected_body_bytes: None,
        }
    }

    pub fn builder() -> ResponseNormalizerBuilder {
        ResponseNormalizerBuilder::default()
    }

    /// Install an override, replacing any previous one.
    pub fn set_override<F>(&mut self, on_response: F)
    where
        F: Fn(&RequestContext, Response) -> Response + Send + Sync + 'static,
    {
        self.on_response = Some(Arc::new(on_response));
    }

    pub fn has_override(&self) -> bool {
        self.on_response.is_some()
    }

    /// Run one response through the override or the default procedure.
    ///
    /// Errors come only from the error handler or from reading an inspected
    /// body; they are returned as-is.
    pub async fn normalize(
        &self,
        ctx: &RequestContext,
        response: Response,
    ) -> Result<Response, BoxError> {
        if let Some(on_response) = &self.on_response {
            metrics::record_outcome(Outcome::Overridden, response.status());
            return Ok(on_response(ctx, response));
        }

        let status = response.status();
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            metrics::record_outcome(Outcome::ServerError, status);
            return Ok(response);
        }

        let (response, error) = self.extract(response).await?;
        let Some(error) = error else {
            metrics::record_outcome(Outcome::PassedThrough, status);
            return Ok(response);
        };

        let error_id = self.handler.log_error(ctx, status, &error).await?;

        tracing::debug!(
            status = status.as_u16(),
            error_id = %error_id,
            request_id = ctx.request_id().unwrap_or("unknown"),
            "Normalized error response"
        );
        metrics::record_outcome(Outcome::Normalized, status);

        Ok(ApiErrorResponse::new(status, error.message, error_id).into_response())
    }

    /// Look for a structured error payload, first in the extensions, then in
    /// a small JSON body when inspection is enabled. The response comes back
    /// unchanged either way.
    async fn extract(
        &self,
        response: Response,
    ) -> Result<(Response, Option<HttpError>), BoxError> {
        if let Some(error) = response.extensions().get::<HttpError>().cloned() {
            return Ok((response, Some(error)));
        }

        let Some(limit) = self.max_inspected_body_bytes else {
            return Ok((response, None));
        };
        // Success bodies are never error payloads.
        let status = response.status();
        if !(status.is_client_error() || status.is_server_error()) {
            return Ok((response, None));
        }
        if !is_json(response.headers()) {
            return Ok((response, None));
        }
        // Only bodies of known, bounded length are buffered.
        match response.body().size_hint().exact() {
            Some(len) if len > 0 && len <= limit as u64 => {}
            _ => return Ok((response, None)),
        }

        let (parts, body) = response.into_parts();
        let bytes = axum::body::to_bytes(body, limit).await?;
        let error = HttpError::from_json(&bytes);

        Ok((Response::from_parts(parts, Body::from(bytes)), error))
    }
}

impl fmt::Debug for ResponseNormalizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResponseNormalizer")
            .field("has_override", &self.has_override())
            .field("max_inspected_body_bytes", &self.max_inspected_body_bytes)
            .finish_non_exhaustive()
    }
}

fn is_json(headers: &HeaderMap) -> bool {
    let Some(content_type) = headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok()) else {
        return false;
    };
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    essence == "application/json"
        || (essence.starts_with("application/") && essence.ends_with("+json"))
}

/// Assembles a [`ResponseNormalizer`]. Refuses to build without an error handler.
#[derive(Default)]
pub struct ResponseNormalizerBuilder {
    handler: Option<Arc<dyn ErrorHandler>>,
    on_response: Option<ResponseOverride>,
    max_inspected_body_bytes: Option<usize>,
}

impl ResponseNormalizerBuilder {
    pub fn error_handler(mut self, handler: impl ErrorHandler + 'static) -> Self {
        self.handler = Some(Arc::new(handler));
        self
    }

    /// Register an override. Last registration wins.
    pub fn on_response<F>(mut self, on_response: F) -> Self
    where
        F: Fn(&RequestContext, Response) -> Response + Send + Sync + 'static,
    {
        self.on_response = Some(Arc::new(on_response));
        self
    }

    /// Also recognise JSON bodies of at most `max_bytes` as structured errors.
    pub fn inspect_json_bodies(mut self, max_bytes: usize) -> Self {
        self.max_inspected_body_bytes = Some(max_bytes);
        self
    }

    pub fn build(self) -> Result<ResponseNormalizer, BuildError> {
        let handler = self.handler.ok_or(BuildError::MissingErrorHandler)?;
        if self.max_inspected_body_bytes == Some(0) {
            return Err(BuildError::ZeroInspectionLimit);
        }

        Ok(ResponseNormalizer {
            handler,
            on_response: self.on_response,
            max_inspected_body_bytes: self.max_inspected_body_bytes,
        })
    }

    pub fn build_layer(self) -> Result<ErrorNormalizationLayer, BuildError> {
        self.build().map(ErrorNormalizationLayer::from)
    }
}
