// Copyright 2025 Pupil Chat Developers
// SPDX-License-Identifier: Apache-2.0

//! # pupil-chat
//!
//! Bridge between an experiment controller and the Pupil eye tracker.
//!
//! ## Quick Start
//!
//! ```toml
//! [dependencies]
//! pupil-chat = "0.1"  # Default: remote + recording
//! ```
//!
//! ## Feature Flags
//!
//! - **`remote`** (default): Pupil Remote request/reply client over ZMQ
//! - **`recording`** (default): MessagePack recording export to CSV
//!
//! ## Usage Examples
//!
//! ### Driving a session
//!
//! ```rust,no_run
//! use pupil_chat::prelude::*;
//!
//! let (connected, pupil) = check_connection("tcp://127.0.0.1:50020")?;
//! if connected {
//!     pupil.clock_change("0.0")?;
//!     pupil.send_command("R")?;
//!     pupil.send_annotation("trial_start")?;
//!     pupil.send_command("r")?;
//! }
//! pupil.close();
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ### Exporting a recording
//!
//! ```rust,no_run
//! use pupil_chat::prelude::*;
//!
//! let summary = save_data("recordings/000/pupil_data", "subject01")?;
//! assert!(summary.pupil_rows > 0);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  Foundation: pupil-config, pupil-observability          │
//! │  (TOML config + overrides, tracing setup)               │
//! └─────────────────────────────────────────────────────────┘
//!                         ↓
//! ┌─────────────────────────────────────────────────────────┐
//! │  I/O: pupil-remote, pupil-recording                     │
//! │  (ZMQ REQ client, MessagePack -> CSV export)            │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## License
//!
//! Apache-2.0

// Re-export foundation
pub use pupil_config as config;
pub use pupil_observability as observability;

// Re-export I/O layer
#[cfg(feature = "remote")]
pub use pupil_remote as remote;

#[cfg(feature = "recording")]
pub use pupil_recording as recording;

/// Prelude - commonly used types and functions
pub mod prelude {
    pub use crate::config::{load_config, validate_config, PupilChatConfig, RemoteConfig};

    #[cfg(feature = "remote")]
    pub use crate::remote::{
        check_connection, check_connection_with, Annotation, RemoteConnection, RemoteError,
    };

    #[cfg(feature = "recording")]
    pub use crate::recording::{save_data, ExportSummary, RecordingError};
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_facade_imports() {
        use crate::prelude::*;
        let config = PupilChatConfig::default();
        assert_eq!(config.remote, RemoteConfig::default());
    }
}
