// Copyright 2025 Pupil Chat Developers
// SPDX-License-Identifier: Apache-2.0

//! # pupil-chat Configuration
//!
//! Type-safe configuration loader for the Pupil bridge with support for:
//! - TOML file parsing (`pupil_chat.toml`)
//! - Environment variable overrides
//! - CLI argument overrides
//!
//! ## Usage
//!
//! ```rust,no_run
//! use pupil_config::load_config;
//!
//! let config = load_config(None, None).expect("Failed to load config");
//! println!("Pupil Remote: {}", config.remote.address);
//! println!("Probe timeout: {} ms", config.remote.probe_timeout_ms);
//! ```

pub mod loader;
pub mod types;
pub mod validation;

pub use loader::{apply_cli_overrides, apply_environment_overrides, find_config_file, load_config};
pub use types::*;
pub use validation::{validate_config, ConfigValidationError};

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config file not found: {0}")]
    FileNotFound(String),

    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid TOML syntax: {0}")]
    ParseError(String),

    #[error("Validation failed: {0}")]
    ValidationError(String),
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;
