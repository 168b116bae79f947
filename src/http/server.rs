//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum Router with the demo routes
//! - Wire up middleware (tracing, request ID, limits, timeout)
//! - Mount error normalization behind error handling
//! - Serve until the shutdown future resolves

use std::future::Future;
use std::time::Duration;

use axum::{
    error_handling::HandleErrorLayer,
    http::StatusCode,
    BoxError, Router,
};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{limit::RequestBodyLimitLayer, timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::AppConfig;
use crate::http::middleware::{BuildError, ErrorNormalizationLayer, ResponseNormalizer};
use crate::http::request::{propagate_request_id_layer, set_request_id_layer};
use crate::http::routes;
use crate::reporting::{ErrorHandler, TracingErrorHandler};

/// HTTP server for the demo API.
pub struct HttpServer {
    router: Router,
    config: AppConfig,
}

impl HttpServer {
    /// Create a server reporting errors through [`TracingErrorHandler`].
    pub fn new(config: AppConfig) -> Result<Self, BuildError> {
        let handler = TracingErrorHandler::new(config.normalization.assign_error_ids);
        Self::with_error_handler(config, handler)
    }

    /// Create a server reporting errors through `handler`.
    pub fn with_error_handler(
        config: AppConfig,
        handler: impl ErrorHandler + 'static,
    ) -> Result<Self, BuildError> {
        let layer = Self::normalization_layer(&config, handler)?;
        Ok(Self::with_normalization(config, layer))
    }

    /// Create a server around an already assembled normalization layer.
    pub fn with_normalization(config: AppConfig, layer: ErrorNormalizationLayer) -> Self {
        let router = Self::build_router(&config, layer);
        Self { router, config }
    }

    fn normalization_layer(
        config: &AppConfig,
        handler: impl ErrorHandler + 'static,
    ) -> Result<ErrorNormalizationLayer, BuildError> {
        let mut builder = ResponseNormalizer::builder().error_handler(handler);
        if config.normalization.inspect_json_bodies {
            builder = builder.inspect_json_bodies(config.normalization.max_inspected_body_bytes);
        }
        builder.build_layer()
    }

    /// Build the Axum router with all middleware layers.
    ///
    /// Outermost first: trace → set request id → propagate request id →
    /// body limit → timeout → error handling → error normalization → routes.
    #[allow(deprecated)]
    fn build_router(config: &AppConfig, normalization: ErrorNormalizationLayer) -> Router {
        Router::new()
            .merge(routes::routes())
            .layer(
                ServiceBuilder::new()
                    .layer(HandleErrorLayer::new(handle_error))
                    .layer(normalization),
            )
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.server.request_timeout_secs,
            )))
            .layer(RequestBodyLimitLayer::new(config.server.max_body_bytes))
            .layer(propagate_request_id_layer())
            .layer(set_request_id_layer())
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server on `listener` until `shutdown` resolves.
    pub async fn run<F>(self, listener: TcpListener, shutdown: F) -> Result<(), std::io::Error>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            inspect_json_bodies = self.config.normalization.inspect_json_bodies,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown)
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// The fully layered router, for driving requests without a socket.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }
}

/// Turn a failure from the normalization stack (inner service or error
/// handler) into a plain 500.
async fn handle_error(err: BoxError) -> (StatusCode, String) {
    tracing::error!(error = %err, "Unhandled error while normalizing response");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        format!("Unhandled internal error: {}", err),
    )
}

/// Wait for Ctrl+C.
pub async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
