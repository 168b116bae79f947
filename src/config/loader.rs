//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::AppConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse_config(&content)
}

/// Parse and validate configuration from TOML text.
pub fn parse_config(content: &str) -> Result<AppConfig, ConfigError> {
    let config: AppConfig = toml::from_str(content)?;
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = parse_config("").unwrap();
        assert_eq!(config.server.bind_address, "0.0.0.0:8080");
        assert!(!config.normalization.inspect_json_bodies);
        assert!(config.normalization.assign_error_ids);
    }

    #[test]
    fn test_partial_sections() {
        let config = parse_config(
            r#"
            [server]
            bind_address = "127.0.0.1:3000"

            [normalization]
            inspect_json_bodies = true
            max_inspected_body_bytes = 2048
            "#,
        )
        .unwrap();

        assert_eq!(config.server.bind_address, "127.0.0.1:3000");
        assert_eq!(config.server.request_timeout_secs, 30);
        assert!(config.normalization.inspect_json_bodies);
        assert_eq!(config.normalization.max_inspected_body_bytes, 2048);
    }

    #[test]
    fn test_parse_error() {
        let err = parse_config("[server]\nrequest_timeout_secs = \"soon\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_validation_error_lists_problems() {
        let err =
            parse_config("[server]\nrequest_timeout_secs = 0\nmax_body_bytes = 0").unwrap_err();
        let message = err.to_string();

        assert!(message.starts_with("Validation failed: "));
        assert!(message.contains("request_timeout_secs"));
        assert!(message.contains("server.max_body_bytes"));
    }

    #[test]
    fn test_missing_file() {
        let err = load_config(Path::new("does/not/exist.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
