//! Configuration validation
//!
//! Checks that configuration values are usable before any socket is opened.

use crate::{ConfigError, ConfigResult, PupilChatConfig};

/// ZMQ transports Pupil Remote can be reached over
const SUPPORTED_SCHEMES: &[&str] = &["tcp://", "ipc://", "inproc://"];

/// Validation errors that can occur during config validation
#[derive(Debug, Clone)]
pub enum ConfigValidationError {
    MissingRequired { field: String },
    InvalidValue { field: String, reason: String },
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingRequired { field } => {
                write!(f, "Missing required configuration: {}", field)
            }
            Self::InvalidValue { field, reason } => {
                write!(f, "Invalid configuration value for {}: {}", field, reason)
            }
        }
    }
}

/// Validate the complete configuration
///
/// Checks for:
/// - A non-empty remote address with a ZMQ transport scheme
/// - A non-zero probe timeout
/// - A linger period of -1 (infinite) or more
///
/// # Errors
///
/// Returns `ConfigError::ValidationError` listing every failed check
pub fn validate_config(config: &PupilChatConfig) -> ConfigResult<()> {
    let mut errors = Vec::new();

    validate_remote(config, &mut errors);

    if !errors.is_empty() {
        let error_messages = errors
            .iter()
            .map(|e| format!("  - {}", e))
            .collect::<Vec<_>>()
            .join("\n");

        return Err(ConfigError::ValidationError(format!(
            "Configuration validation failed:\n{}",
            error_messages
        )));
    }

    Ok(())
}

fn validate_remote(config: &PupilChatConfig, errors: &mut Vec<ConfigValidationError>) {
    let remote = &config.remote;

    if remote.address.is_empty() {
        errors.push(ConfigValidationError::MissingRequired {
            field: "remote.address".to_string(),
        });
    } else if !SUPPORTED_SCHEMES
        .iter()
        .any(|scheme| remote.address.starts_with(scheme))
    {
        errors.push(ConfigValidationError::InvalidValue {
            field: "remote.address".to_string(),
            reason: format!("must start with one of {}", SUPPORTED_SCHEMES.join(", ")),
        });
    }

    if remote.probe_timeout_ms == 0 {
        errors.push(ConfigValidationError::InvalidValue {
            field: "remote.probe_timeout_ms".to_string(),
            reason: "must be positive".to_string(),
        });
    }

    if remote.linger_ms < -1 {
        errors.push(ConfigValidationError::InvalidValue {
            field: "remote.linger_ms".to_string(),
            reason: "must be -1 (infinite) or a non-negative number of milliseconds".to_string(),
        });
    }
}
