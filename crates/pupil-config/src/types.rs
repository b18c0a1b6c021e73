// Copyright 2025 Pupil Chat Developers
// SPDX-License-Identifier: Apache-2.0

//! Configuration type definitions
//!
//! Each struct maps to a section of `pupil_chat.toml`:
//!
//! ```toml
//! [remote]
//! address = "tcp://127.0.0.1:50020"
//! probe_timeout_ms = 1000
//! linger_ms = 0
//!
//! [export]
//! output_dir = "."
//!
//! [logging]
//! level = "info"
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct PupilChatConfig {
    pub remote: RemoteConfig,
    pub export: ExportConfig,
    pub logging: LoggingConfig,
}

/// Pupil Remote connection settings
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct RemoteConfig {
    /// ZMQ endpoint of Pupil Remote (REQ/REP)
    pub address: String,
    /// How long the connection probe waits for the first reply
    pub probe_timeout_ms: u64,
    /// Socket linger on close (0 = drop pending messages immediately)
    pub linger_ms: i32,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            address: "tcp://127.0.0.1:50020".to_string(),
            probe_timeout_ms: 1000,
            linger_ms: 0,
        }
    }
}

impl RemoteConfig {
    /// Create a config for the given endpoint, keeping the other defaults
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            ..Default::default()
        }
    }

    /// Set the probe timeout
    pub fn with_probe_timeout(mut self, timeout: Duration) -> Self {
        self.probe_timeout_ms = timeout.as_millis() as u64;
        self
    }

    /// Set the socket linger period
    pub fn with_linger_ms(mut self, linger_ms: i32) -> Self {
        self.linger_ms = linger_ms;
        self
    }

    pub fn probe_timeout(&self) -> Duration {
        Duration::from_millis(self.probe_timeout_ms)
    }
}

/// Recording export settings
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Directory that relative output prefixes are resolved against
    pub output_dir: PathBuf,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
        }
    }
}

/// Logging settings
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default level when no debug flags or RUST_LOG are given
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}
