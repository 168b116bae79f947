//! Per-request context handed to error handlers.

use axum::http::{HeaderMap, Method, Request, Uri, Version};

use crate::http::X_REQUEST_ID;

/// Snapshot of the request head, captured before the request is handed to
/// the inner service.
///
/// The error normalization middleware only carries it around; error handlers
/// are free to read whatever they need for correlation.
#[derive(Debug, Clone)]
pub struct RequestContext {
    method: Method,
    uri: Uri,
    version: Version,
    headers: HeaderMap,
}

impl RequestContext {
    pub fn from_request<B>(request: &Request<B>) -> Self {
        Self {
            method: request.method().clone(),
            uri: request.uri().clone(),
            version: request.version(),
            headers: request.headers().clone(),
        }
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn uri(&self) -> &Uri {
        &self.uri
    }

    pub fn version(&self) -> Version {
        self.version
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Value of the `x-request-id` header, if the request carried a valid one.
    pub fn request_id(&self) -> Option<&str> {
        self.headers
            .get(X_REQUEST_ID)
            .and_then(|value| value.to_str().ok())
    }
}
