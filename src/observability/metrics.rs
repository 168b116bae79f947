//! Metrics collection and exposition.
//!
//! # Metrics
//! - `error_normalizer_responses_total` (counter): responses seen by the
//!   normalization middleware, by `outcome` and `status`

use std::net::SocketAddr;

use axum::http::StatusCode;
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

use crate::http::middleware::Outcome;

/// Start the Prometheus scrape endpoint. Must run inside the Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

pub fn record_outcome(outcome: Outcome, status: StatusCode) {
    ::metrics::counter!(
        "error_normalizer_responses_total",
        "outcome" => outcome.as_str(),
        "status" => status.as_u16().to_string()
    )
    .increment(1);
}
