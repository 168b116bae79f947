//! Error normalizer demo server.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request
//!     ──────────────▶ trace → request id → limits → error handling
//!                                                        │
//!                                                        ▼
//!                                            ┌──────────────────────┐
//!                                            │ error normalization  │──▶ ErrorHandler
//!                                            └──────────┬───────────┘    (correlation id)
//!                                                       ▼
//!                                                    routes
//!
//!     Client Response
//!     ◀────────────── {statusCode, message, errorId?} or the untouched response
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use error_normalizer::config::{load_config, validate_config, AppConfig, ConfigError};
use error_normalizer::http::server::shutdown_signal;
use error_normalizer::observability::{logging, metrics};
use error_normalizer::HttpServer;

#[derive(Parser)]
#[command(name = "error-normalizer")]
#[command(about = "Demo API serving normalized error envelopes", long_about = None)]
struct Cli {
    /// TOML configuration file; defaults are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override `server.bind_address`.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => AppConfig::default(),
    };
    if let Some(bind) = cli.bind {
        config.server.bind_address = bind;
        validate_config(&config).map_err(ConfigError::Validation)?;
    }

    logging::init_logging(&config.observability)?;

    tracing::info!(
        bind_address = %config.server.bind_address,
        request_timeout_secs = config.server.request_timeout_secs,
        inspect_json_bodies = config.normalization.inspect_json_bodies,
        assign_error_ids = config.normalization.assign_error_ids,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr)?,
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.server.bind_address).await?;
    let server = HttpServer::new(config)?;
    server.run(listener, shutdown_signal()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
