// Copyright 2025 Pupil Chat Developers
// SPDX-License-Identifier: Apache-2.0

/*!
Pupil Chat command-line tool

Drives Pupil Remote from the shell and exports recordings to CSV.

Usage:
  pupil-chat [--address tcp://HOST:PORT] <COMMAND>

Example:
  pupil-chat set-clock 0.0
  pupil-chat command R
  pupil-chat annotate stimulus_on
  pupil-chat command r
  pupil-chat export recordings/000/pupil_data subject01
*/

use std::collections::HashMap;
use std::env;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use pupil_chat::config::{load_config, validate_config, PupilChatConfig, RemoteConfig};
use pupil_chat::observability::{
    debug_flags_help, init_logging, parse_debug_flags, strip_debug_flags,
};
use pupil_chat::recording::save_data;
use pupil_chat::remote::{check_connection_with, RemoteConnection};

/// Pupil Chat - talk to Pupil Remote and export recordings
#[derive(Parser, Debug)]
#[command(name = "pupil-chat", version, about, after_help = debug_flags_help())]
struct Cli {
    /// Path to pupil_chat.toml (searched for when omitted)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Pupil Remote address, e.g. tcp://127.0.0.1:50020
    #[arg(long, global = true)]
    address: Option<String>,

    /// How long the connection probe waits for a reply
    #[arg(long, global = true)]
    probe_timeout_ms: Option<u64>,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand, Debug)]
enum Action {
    #[command(flatten)]
    Remote(RemoteAction),

    /// Export a recording to <PREFIX>_pupil.csv and <PREFIX>_gaze.csv
    Export {
        /// MessagePack recording (pupil_data)
        recording: PathBuf,

        /// Output prefix; relative prefixes land in export.output_dir
        prefix: PathBuf,
    },
}

/// Requests sent over a probed Pupil Remote connection
#[derive(Subcommand, Debug)]
enum RemoteAction {
    /// Check that Pupil Remote answers
    Probe,

    /// Send a raw command (e.g. R to start recording, r to stop)
    Command { command: String },

    /// Set the device clock and print the time it reports afterwards
    SetClock { value: String },

    /// Print the device time
    Time,

    /// Measure one time-query round trip
    Timing,

    /// Publish an annotation stamped with the current device time
    Annotate { label: String },
}

fn main() -> Result<()> {
    let debug_flags = parse_debug_flags();
    // --debug-* flags are handled by pupil-observability, not clap
    let cli = Cli::parse_from(strip_debug_flags(env::args()));

    let mut overrides = HashMap::new();
    if let Some(address) = &cli.address {
        overrides.insert("address".to_string(), address.clone());
    }
    if let Some(timeout) = cli.probe_timeout_ms {
        overrides.insert("probe_timeout_ms".to_string(), timeout.to_string());
    }

    let config = load_config(cli.config.as_deref(), Some(&overrides))
        .context("Failed to load configuration")?;
    validate_config(&config)?;

    init_logging(&debug_flags, &config.logging.level)?;

    match cli.action {
        Action::Remote(action) => run_remote(&config.remote, action),
        Action::Export { recording, prefix } => export(&config, &recording, &prefix),
    }
}

/// Probe, run one action, and always close the connection
fn run_remote(remote: &RemoteConfig, action: RemoteAction) -> Result<()> {
    let (connected, pupil) = check_connection_with(remote)
        .with_context(|| format!("Failed to open a connection to {}", remote.address))?;

    if !connected {
        pupil.close();
        bail!(
            "Pupil Remote at {} did not answer within {} ms",
            remote.address,
            remote.probe_timeout_ms
        );
    }

    let outcome = perform(&pupil, action);
    pupil.close();
    outcome
}

fn perform(pupil: &RemoteConnection, action: RemoteAction) -> Result<()> {
    match action {
        RemoteAction::Probe => {
            println!("Connected to {}", pupil.address());
        }
        RemoteAction::Command { command } => {
            pupil
                .send_command(&command)
                .with_context(|| format!("Command {:?} failed", command))?;
            info!("Sent command {:?}", command);
        }
        RemoteAction::SetClock { value } => {
            let device_time = pupil
                .clock_change(&value)
                .with_context(|| format!("Failed to set the device clock to {}", value))?;
            println!("{}", device_time);
        }
        RemoteAction::Time => {
            println!("{}", pupil.get_time().context("Time query failed")?);
        }
        RemoteAction::Timing => {
            let elapsed = pupil.check_timing().context("Timing check failed")?;
            println!("{:.3} ms", elapsed.as_secs_f64() * 1000.0);
        }
        RemoteAction::Annotate { label } => {
            let stamped_at = pupil
                .send_annotation(&label)
                .with_context(|| format!("Failed to publish annotation {:?}", label))?;
            println!("{}", stamped_at);
        }
    }
    Ok(())
}

fn export(config: &PupilChatConfig, recording: &Path, prefix: &Path) -> Result<()> {
    // Absolute prefixes replace output_dir entirely
    let prefix = config.export.output_dir.join(prefix);

    let summary = save_data(recording, &prefix)
        .with_context(|| format!("Failed to export {}", recording.display()))?;

    println!(
        "{} ({} rows{})",
        summary.pupil_path.display(),
        summary.pupil_rows,
        if summary.pupil_3d { ", 3D" } else { "" }
    );
    println!(
        "{} ({} rows)",
        summary.gaze_path.display(),
        summary.gaze_rows
    );
    Ok(())
}
