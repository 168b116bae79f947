//! HTTP error response normalization for Axum/Tower services.
//!
//! Responses carrying an [`HttpError`] are reported through an
//! [`ErrorHandler`] and rewritten into an [`ApiErrorResponse`] envelope with
//! the handler's correlation id. Everything else passes through untouched.

pub mod config;
pub mod envelope;
pub mod http;
pub mod observability;
pub mod reporting;

pub use config::AppConfig;
pub use envelope::{ApiErrorResponse, ErrorId, HttpError};
pub use http::{ErrorNormalizationLayer, HttpServer, RequestContext, ResponseNormalizer};
pub use reporting::{ErrorHandler, TracingErrorHandler};
