//! Tower layer wrapping a service with [`ResponseNormalizer`].

use std::sync::Arc;
use std::task::{Context, Poll};

use axum::{http::Request, response::Response, BoxError};
use futures_util::future::BoxFuture;
use tower::{Layer, Service};

use crate::http::middleware::normalizer::{ResponseNormalizer, ResponseNormalizerBuilder};
use crate::http::RequestContext;
use crate::reporting::ErrorHandler;

/// Applies error normalization to every response of the wrapped service.
///
/// The produced service fails with [`BoxError`] when the inner service or the
/// error handler fails, so mount it behind
/// [`HandleErrorLayer`](axum::error_handling::HandleErrorLayer) in a router.
#[derive(Debug, Clone)]
pub struct ErrorNormalizationLayer {
    normalizer: Arc<ResponseNormalizer>,
}

impl ErrorNormalizationLayer {
    pub fn new(handler: impl ErrorHandler + 'static) -> Self {
        Self::from(ResponseNormalizer::new(handler))
    }

    pub fn builder() -> ResponseNormalizerBuilder {
        ResponseNormalizer::builder()
    }

    /// Register an override. Last registration wins.
    pub fn on_response<F>(mut self, on_response: F) -> Self
    where
        F: Fn(&RequestContext, Response) -> Response + Send + Sync + 'static,
    {
        Arc::make_mut(&mut self.normalizer).set_override(on_response);
        self
    }

    pub fn normalizer(&self) -> &ResponseNormalizer {
        &self.normalizer
    }
}

impl From<ResponseNormalizer> for ErrorNormalizationLayer {
    fn from(normalizer: ResponseNormalizer) -> Self {
        Self {
            normalizer: Arc::new(normalizer),
        }
    }
}

impl<S> Layer<S> for ErrorNormalizationLayer {
    type Service = ErrorNormalization<S>;

    fn layer(&self, inner: S) -> Self::Service {
        ErrorNormalization {
            inner,
            normalizer: self.normalizer.clone(),
        }
    }
}

/// Service produced by [`ErrorNormalizationLayer`].
#[derive(Debug, Clone)]
pub struct ErrorNormalization<S> {
    inner: S,
    normalizer: Arc<ResponseNormalizer>,
}

impl<S, B> Service<Request<B>> for ErrorNormalization<S>
where
    S: Service<Request<B>, Response = Response> + Clone + Send + 'static,
    S::Error: Into<BoxError>,
    S::Future: Send + 'static,
    B: Send + 'static,
{
    type Response = Response;
    type Error = BoxError;
    type Future = BoxFuture<'static, Result<Response, BoxError>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx).map_err(Into::into)
    }

    fn call(&mut self, request: Request<B>) -> Self::Future {
        let ctx = RequestContext::from_request(&request);
        let normalizer = self.normalizer.clone();

        // Keep the instance that was driven to readiness.
        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);

        Box::pin(async move {
            let response = inner.call(request).await.map_err(Into::<BoxError>::into)?;
            normalizer.normalize(&ctx, response).await
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::{
        body::Body,
        http::StatusCode,
        response::IntoResponse,
    };
    use std::convert::Infallible;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tower::{service_fn, ServiceExt};

    use crate::envelope::{ErrorId, HttpError};

    #[derive(Default)]
    struct Counting(AtomicUsize);

    #[async_trait]
    impl ErrorHandler for Counting {
        async fn log_error(
            &self,
            ctx: &RequestContext,
            _status: StatusCode,
            _error: &HttpError,
        ) -> Result<ErrorId, BoxError> {
            assert_eq!(ctx.request_id(), Some("req-1"));
            self.0.fetch_add(1, Ordering::SeqCst);
            Ok(ErrorId::new_v4())
        }
    }

    fn request() -> Request<Body> {
        Request::get("/missing")
            .header("x-request-id", "req-1")
            .body(Body::empty())
            .unwrap()
    }

    #[tokio::test]
    async fn test_layer_normalizes_inner_response() {
        let handler = Arc::new(Counting::default());
        let service = ErrorNormalizationLayer::new(handler.clone()).layer(service_fn(
            |_req: Request<Body>| async {
                Ok::<_, Infallible>((StatusCode::NOT_FOUND, HttpError::new("gone")).into_response())
            },
        ));

        let response = service.oneshot(request()).await.unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(response.extensions().get::<HttpError>().is_none());
        assert_eq!(handler.0.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_layer_propagates_inner_error() {
        let handler = Arc::new(Counting::default());
        let service = ErrorNormalizationLayer::new(handler.clone()).layer(service_fn(
            |_req: Request<Body>| async {
                Err::<Response, _>(std::io::Error::other("connection reset"))
            },
        ));

        let err = service.oneshot(request()).await.unwrap_err();

        assert!(err.is::<std::io::Error>());
        assert_eq!(handler.0.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_layer_override() {
        let handler = Arc::new(Counting::default());
        let layer = ErrorNormalizationLayer::new(handler.clone())
            .on_response(|_, _| StatusCode::ACCEPTED.into_response());
        assert!(layer.normalizer().has_override());

        let service = layer.layer(service_fn(|_req: Request<Body>| async {
            Ok::<_, Infallible>((StatusCode::NOT_FOUND, HttpError::new("gone")).into_response())
        }));

        let response = service.oneshot(request()).await.unwrap();

        assert_eq!(response.status(), StatusCode::ACCEPTED);
        assert_eq!(handler.0.load(Ordering::SeqCst), 0);
    }
}
