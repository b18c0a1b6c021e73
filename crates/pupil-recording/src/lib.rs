// Copyright 2025 Pupil Chat Developers
// SPDX-License-Identifier: Apache-2.0

//! # pupil-recording
//!
//! Offline conversion of a Pupil recording (one MessagePack map holding
//! `pupil_positions` and `gaze_positions`) into two CSV tables:
//!
//! | File | Columns |
//! |---|---|
//! | `<prefix>_pupil.csv` | `id,timestamp,diameter,confidence,xpos,ypos`, or with `3dDiameter,3dModelConfidence` before `xpos` when the first pupil record has 3D output |
//! | `<prefix>_gaze.csv` | `id,timestamp,xpos,ypos,confidence` |
//!
//! The whole recording is decoded into memory; there is no streaming mode.

pub mod error;
pub mod export;
pub mod samples;
pub mod table;

pub use error::{RecordingError, RecordingResult};
pub use export::{
    gaze_table, load_recording, pupil_table, save_data, ExportSummary, GAZE_HEADER,
    PUPIL_HEADER_2D, PUPIL_HEADER_3D,
};
pub use samples::{BaseDatum, GazeDatum, PupilDatum, Recording};
pub use table::{format_scientific, SampleTable};
