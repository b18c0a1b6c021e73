// Copyright 2025 Pupil Chat Developers
// SPDX-License-Identifier: Apache-2.0

//! # pupil-remote
//!
//! Blocking client for Pupil Remote, the ZMQ REQ/REP endpoint exposed by
//! Pupil Capture.
//!
//! ## Quick Start
//!
//! ```no_run
//! use pupil_remote::check_connection;
//!
//! let (connected, connection) = check_connection("tcp://127.0.0.1:50020")?;
//! if !connected {
//!     connection.close();
//!     panic!("Pupil Remote is not answering");
//! }
//!
//! connection.clock_change("0.0")?;
//! connection.send_command("R")?;
//! let stamped_at = connection.send_annotation("stimulus_on")?;
//! println!("annotated at {}", stamped_at);
//! connection.send_command("r")?;
//!
//! connection.close();
//! # Ok::<(), pupil_remote::RemoteError>(())
//! ```
//!
//! ## Behaviour
//!
//! - One requester per connection, strictly alternating request and reply.
//! - Only the connection probe has a timeout. A device that stops answering
//!   afterwards blocks the caller indefinitely.
//! - No retries and no reconnection.

pub mod annotation;
pub mod commands;
pub mod connection;
pub mod error;

pub use annotation::Annotation;
pub use connection::{check_connection, check_connection_with, RemoteConnection};
pub use error::{RemoteError, RemoteResult};
pub use pupil_config::RemoteConfig;
