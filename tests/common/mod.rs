//! Shared utilities for integration tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{HeaderMap, Request, StatusCode},
    BoxError, Router,
};
use tower::ServiceExt;

use error_normalizer::{ErrorHandler, ErrorId, HttpError, RequestContext};

/// One call observed by [`RecordingHandler`].
#[allow(dead_code)]
#[derive(Debug, Clone)]
pub struct Recorded {
    pub status: StatusCode,
    pub error: HttpError,
    pub path: String,
    pub request_id: Option<String>,
}

/// Error handler that remembers every call and returns a fixed id.
#[derive(Debug, Default)]
pub struct RecordingHandler {
    calls: Mutex<Vec<Recorded>>,
    error_id: ErrorId,
    fail: bool,
}

#[allow(dead_code)]
impl RecordingHandler {
    pub fn returning(error_id: ErrorId) -> Arc<Self> {
        Arc::new(Self {
            error_id,
            ..Default::default()
        })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            fail: true,
            ..Default::default()
        })
    }

    pub fn calls(&self) -> Vec<Recorded> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ErrorHandler for RecordingHandler {
    async fn log_error(
        &self,
        ctx: &RequestContext,
        status: StatusCode,
        error: &HttpError,
    ) -> Result<ErrorId, BoxError> {
        self.calls.lock().unwrap().push(Recorded {
            status,
            error: error.clone(),
            path: ctx.uri().path().to_string(),
            request_id: ctx.request_id().map(str::to_string),
        });

        if self.fail {
            return Err("error log unavailable".into());
        }
        Ok(self.error_id)
    }
}

/// Drive one request through `router` and collect the response.
#[allow(dead_code)]
pub async fn send(router: Router, request: Request<Body>) -> (StatusCode, HeaderMap, Vec<u8>) {
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec();
    (status, headers, body)
}

#[allow(dead_code)]
pub fn get(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).unwrap()
}

#[allow(dead_code)]
pub fn post_json(uri: &str, body: &'static str) -> Request<Body> {
    Request::post(uri)
        .header("content-type", "application/json")
        .body(Body::from(body))
        .unwrap()
}
