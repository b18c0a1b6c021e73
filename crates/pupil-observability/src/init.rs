// Copyright 2025 Pupil Chat Developers
// SPDX-License-Identifier: Apache-2.0

//! Logging initialization

use anyhow::{anyhow, Context, Result};
use tracing_subscriber::EnvFilter;

use crate::cli::CrateDebugFlags;

/// Build the log filter
///
/// `RUST_LOG` wins when it is set; otherwise the filter is derived from the
/// debug flags with `default_level` for everything not flagged.
pub fn build_filter(debug_flags: &CrateDebugFlags, default_level: &str) -> Result<EnvFilter> {
    if std::env::var("RUST_LOG").is_ok() {
        return EnvFilter::try_from_default_env().context("Invalid RUST_LOG directive");
    }

    let filter = debug_flags.to_filter_string(default_level);
    EnvFilter::try_new(&filter).with_context(|| format!("Invalid log filter: {}", filter))
}

/// Initialize console logging for the process
///
/// Can only succeed once per process; a second call reports an error.
pub fn init_logging(debug_flags: &CrateDebugFlags, default_level: &str) -> Result<()> {
    let env_filter = build_filter(debug_flags, default_level)?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(debug_flags.any_enabled())
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow!("Failed to initialize logging: {}", e))?;

    tracing::debug!(
        "Logging initialized (debug crates: {:?})",
        debug_flags.enabled_crates.keys().collect::<Vec<_>>()
    );
    Ok(())
}
