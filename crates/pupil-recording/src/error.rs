// Copyright 2025 Pupil Chat Developers
// SPDX-License-Identifier: Apache-2.0

//! Error types for recording export

use std::path::PathBuf;

/// Result type alias for recording export
pub type RecordingResult<T> = Result<T, RecordingError>;

/// Everything that can stop an export
///
/// An export has no partial-success mode: the first error ends it.
#[derive(Debug, thiserror::Error)]
pub enum RecordingError {
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not MessagePack, or a record has the wrong shape
    #[error("Failed to decode recording: {0}")]
    Decode(#[from] rmp_serde::decode::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A required top-level key is absent (or nil)
    #[error("Recording has no '{0}' series")]
    MissingSeries(&'static str),

    #[error("Recording series '{0}' is empty")]
    EmptySeries(&'static str),

    /// A record lacks a field its series layout requires
    #[error("Record {index} of '{series}' has no '{field}'")]
    MalformedRecord {
        series: &'static str,
        index: usize,
        field: &'static str,
    },

    /// A gaze record whose `base_data` list is empty
    #[error("Gaze record {index} has no base data")]
    MissingBaseData { index: usize },
}

impl RecordingError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
