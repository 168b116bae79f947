//! Configuration validation.
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: AppConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use thiserror::Error;
use tracing_subscriber::EnvFilter;

use crate::config::schema::AppConfig;

/// A single semantic problem with a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field} is not a valid socket address: {value:?}")]
    InvalidAddress { field: &'static str, value: String },

    #[error("server.request_timeout_secs must be greater than zero")]
    ZeroTimeout,

    #[error("{field} must be greater than zero")]
    ZeroLimit { field: &'static str },

    #[error(
        "normalization.max_inspected_body_bytes ({inspected}) exceeds server.max_body_bytes ({max})"
    )]
    InspectionLimitTooLarge { inspected: usize, max: usize },

    #[error("observability.log_filter is invalid: {0}")]
    InvalidLogFilter(String),
}

/// Check a parsed configuration for semantic errors.
pub fn validate_config(config: &AppConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.server.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field: "server.bind_address",
            value: config.server.bind_address.clone(),
        });
    }
    if config.server.request_timeout_secs == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }
    if config.server.max_body_bytes == 0 {
        errors.push(ValidationError::ZeroLimit {
            field: "server.max_body_bytes",
        });
    }

    let normalization = &config.normalization;
    if normalization.max_inspected_body_bytes == 0 {
        errors.push(ValidationError::ZeroLimit {
            field: "normalization.max_inspected_body_bytes",
        });
    } else if normalization.max_inspected_body_bytes > config.server.max_body_bytes {
        errors.push(ValidationError::InspectionLimitTooLarge {
            inspected: normalization.max_inspected_body_bytes,
            max: config.server.max_body_bytes,
        });
    }

    let observability = &config.observability;
    if let Err(e) = EnvFilter::try_new(&observability.log_filter) {
        errors.push(ValidationError::InvalidLogFilter(e.to_string()));
    }
    if observability.metrics_enabled
        && observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidAddress {
            field: "observability.metrics_address",
            value: observability.metrics_address.clone(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert_eq!(validate_config(&AppConfig::default()), Ok(()));
    }

    #[test]
    fn test_collects_every_error() {
        let mut config = AppConfig::default();
        config.server.bind_address = "localhost".into();
        config.server.request_timeout_secs = 0;
        config.normalization.max_inspected_body_bytes = 0;

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(errors.contains(&ValidationError::ZeroTimeout));
        assert!(errors.contains(&ValidationError::ZeroLimit {
            field: "normalization.max_inspected_body_bytes"
        }));
    }

    #[test]
    fn test_inspection_limit_bounded_by_body_limit() {
        let mut config = AppConfig::default();
        config.server.max_body_bytes = 1024;
        config.normalization.max_inspected_body_bytes = 4096;

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![ValidationError::InspectionLimitTooLarge {
                inspected: 4096,
                max: 1024
            }]
        );
    }

    #[test]
    fn test_metrics_address_checked_only_when_enabled() {
        let mut config = AppConfig::default();
        config.observability.metrics_address = "nope".into();
        assert!(validate_config(&config).is_ok());

        config.observability.metrics_enabled = true;
        assert!(matches!(
            validate_config(&config).unwrap_err()[0],
            ValidationError::InvalidAddress { field: "observability.metrics_address", .. }
        ));
    }
}
