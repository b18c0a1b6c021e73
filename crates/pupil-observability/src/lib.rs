// Copyright 2025 Pupil Chat Developers
// SPDX-License-Identifier: Apache-2.0

//! # pupil-observability
//!
//! Logging setup shared by the pupil-chat crates, with per-crate debug flag
//! support (`--debug-pupil-remote`, `--debug-all`, `PUPIL_DEBUG=...`).

pub mod cli;
pub mod init;

pub use cli::*;
pub use init::*;

/// Known pupil-chat crate names for debug flags
pub const KNOWN_CRATES: &[&str] = &[
    "pupil-chat",
    "pupil-config",
    "pupil-remote",
    "pupil-recording",
];
