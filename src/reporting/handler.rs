//! Error handler contract.

use std::sync::Arc;

use async_trait::async_trait;
use axum::{http::StatusCode, BoxError};

use crate::envelope::{ErrorId, HttpError};
use crate::http::RequestContext;

/// Records a structured error and hands back a correlation id.
///
/// Called at most once per normalized response. Returning
/// [`ErrorId::EMPTY`] means the error was not recorded and the envelope will
/// carry no `errorId`. An `Err` aborts the request and surfaces through the
/// host's error handling.
#[async_trait]
pub trait ErrorHandler: Send + Sync {
    async fn log_error(
        &self,
        ctx: &RequestContext,
        status: StatusCode,
        error: &HttpError,
    ) -> Result<ErrorId, BoxError>;
}

#[async_trait]
impl<T> ErrorHandler for Arc<T>
where
    T: ErrorHandler + ?Sized,
{
    async fn log_error(
        &self,
        ctx: &RequestContext,
        status: StatusCode,
        error: &HttpError,
    ) -> Result<ErrorId, BoxError> {
        (**self).log_error(ctx, status, error).await
    }
}
