// Copyright 2025 Pupil Chat Developers
// SPDX-License-Identifier: Apache-2.0

//! Recording export
//!
//! Pupil and gaze samples are stamped independently, so they go to two
//! separate tables and are never aligned against each other.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::error::{RecordingError, RecordingResult};
use crate::samples::{GazeDatum, PupilDatum, Recording};
use crate::table::SampleTable;

/// Pupil columns without 3D model output
pub const PUPIL_HEADER_2D: &[&str] = &["id", "timestamp", "diameter", "confidence", "xpos", "ypos"];

/// Pupil columns with 3D model output
pub const PUPIL_HEADER_3D: &[&str] = &[
    "id",
    "timestamp",
    "diameter",
    "confidence",
    "3dDiameter",
    "3dModelConfidence",
    "xpos",
    "ypos",
];

/// Gaze columns
pub const GAZE_HEADER: &[&str] = &["id", "timestamp", "xpos", "ypos", "confidence"];

/// What an export produced
#[derive(Debug, Clone, PartialEq)]
pub struct ExportSummary {
    pub pupil_path: PathBuf,
    pub gaze_path: PathBuf,
    pub pupil_rows: usize,
    pub gaze_rows: usize,
    /// Whether the pupil table carries the 3D columns
    pub pupil_3d: bool,
}

/// Decode a whole recording file into memory
pub fn load_recording(path: &Path) -> RecordingResult<Recording> {
    let bytes = fs::read(path).map_err(|e| RecordingError::io(path, e))?;
    let recording = rmp_serde::from_slice(&bytes)?;
    debug!(
        "[RECORDING] Decoded {} ({} bytes)",
        path.display(),
        bytes.len()
    );
    Ok(recording)
}

/// Export a recording as `<prefix>_pupil.csv` and `<prefix>_gaze.csv`
///
/// The pupil table is written before the gaze series is looked at, so a
/// recording with a bad gaze series still leaves the pupil file behind.
///
/// # Example
/// ```no_run
/// use pupil_recording::save_data;
///
/// let summary = save_data("recordings/000/pupil_data", "subject01")?;
/// println!("{} pupil rows, {} gaze rows", summary.pupil_rows, summary.gaze_rows);
/// # Ok::<(), pupil_recording::RecordingError>(())
/// ```
pub fn save_data(
    recording_path: impl AsRef<Path>,
    output_prefix: impl AsRef<Path>,
) -> RecordingResult<ExportSummary> {
    let recording_path = recording_path.as_ref();
    let output_prefix = output_prefix.as_ref();
    info!("[RECORDING] Exporting {}", recording_path.display());

    let recording = load_recording(recording_path)?;

    let pupil_positions = recording
        .pupil_positions
        .ok_or(RecordingError::MissingSeries("pupil_positions"))?;
    let pupil_table = pupil_table(&pupil_positions)?;
    let pupil_path = suffixed(output_prefix, "_pupil.csv");
    let pupil_rows = pupil_table.write_csv(&pupil_path)?;
    info!(
        "[RECORDING] Wrote {} pupil rows to {}",
        pupil_rows,
        pupil_path.display()
    );

    let gaze_positions = recording
        .gaze_positions
        .ok_or(RecordingError::MissingSeries("gaze_positions"))?;
    let gaze_table = gaze_table(&gaze_positions)?;
    let gaze_path = suffixed(output_prefix, "_gaze.csv");
    let gaze_rows = gaze_table.write_csv(&gaze_path)?;
    info!(
        "[RECORDING] Wrote {} gaze rows to {}",
        gaze_rows,
        gaze_path.display()
    );

    Ok(ExportSummary {
        pupil_path,
        gaze_path,
        pupil_rows,
        gaze_rows,
        pupil_3d: pupil_table.column_count() == PUPIL_HEADER_3D.len(),
    })
}

/// Build the pupil table
///
/// Whether the 3D columns exist is decided by the first record alone and
/// applied to the whole series. Later records without 3D output get `NaN`
/// in those columns; 3D output on later records is ignored when the first
/// record has none.
pub fn pupil_table(pupil_positions: &[PupilDatum]) -> RecordingResult<SampleTable> {
    let first = pupil_positions
        .first()
        .ok_or(RecordingError::EmptySeries("pupil_positions"))?;
    let with_3d = first.diameter_3d.is_some();
    // The first record defines the layout, so it must be complete
    if with_3d && first.model_confidence.is_none() {
        return Err(RecordingError::MalformedRecord {
            series: "pupil_positions",
            index: 0,
            field: "model_confidence",
        });
    }
    debug!(
        "[RECORDING] {} pupil records, 3D columns: {}",
        pupil_positions.len(),
        with_3d
    );

    let column = |field: fn(&PupilDatum) -> f64| -> Vec<f64> {
        pupil_positions.iter().map(field).collect()
    };

    let mut table = SampleTable::new();
    table.push_column("id", column(|d| d.id));
    table.push_column("timestamp", column(|d| d.timestamp));
    table.push_column("diameter", column(|d| d.diameter));
    table.push_column("confidence", column(|d| d.confidence));

    if with_3d {
        let incomplete = pupil_positions
            .iter()
            .filter(|d| d.diameter_3d.is_none() || d.model_confidence.is_none())
            .count();
        if incomplete > 0 {
            warn!(
                "[RECORDING] {} of {} pupil records lack 3D fields; writing NaN for them",
                incomplete,
                pupil_positions.len()
            );
        }

        table.push_column("3dDiameter", column(|d| d.diameter_3d.unwrap_or(f64::NAN)));
        table.push_column(
            "3dModelConfidence",
            column(|d| d.model_confidence.unwrap_or(f64::NAN)),
        );
    }

    table.push_column("xpos", column(|d| d.norm_pos[0]));
    table.push_column("ypos", column(|d| d.norm_pos[1]));

    Ok(table)
}

/// Build the gaze table, identifying each sample by its first base datum
pub fn gaze_table(gaze_positions: &[GazeDatum]) -> RecordingResult<SampleTable> {
    if gaze_positions.is_empty() {
        return Err(RecordingError::EmptySeries("gaze_positions"));
    }

    let ids = gaze_positions
        .iter()
        .enumerate()
        .map(|(index, datum)| {
            datum
                .base_data
                .first()
                .map(|base| base.id)
                .ok_or(RecordingError::MissingBaseData { index })
        })
        .collect::<RecordingResult<Vec<f64>>>()?;

    let column = |field: fn(&GazeDatum) -> f64| -> Vec<f64> {
        gaze_positions.iter().map(field).collect()
    };

    let mut table = SampleTable::new();
    table.push_column("id", ids);
    table.push_column("timestamp", column(|d| d.timestamp));
    table.push_column("xpos", column(|d| d.norm_pos[0]));
    table.push_column("ypos", column(|d| d.norm_pos[1]));
    table.push_column("confidence", column(|d| d.confidence));

    Ok(table)
}

/// `<prefix><suffix>`, keeping any directory part of the prefix
fn suffixed(prefix: &Path, suffix: &str) -> PathBuf {
    let mut name = OsString::from(prefix.as_os_str());
    name.push(suffix);
    PathBuf::from(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::samples::BaseDatum;

    fn pupil(id: f64, timestamp: f64) -> PupilDatum {
        PupilDatum::new(id, timestamp, 30.0, 0.9, [0.4, 0.6])
    }

    #[test]
    fn test_pupil_header_2d() {
        let table = pupil_table(&[pupil(0.0, 1.0), pupil(1.0, 2.0)]).unwrap();
        assert_eq!(table.column_names(), PUPIL_HEADER_2D);
    }

    #[test]
    fn test_pupil_header_3d_follows_first_record() {
        let records = vec![pupil(0.0, 1.0).with_3d(3.1, 0.8), pupil(0.0, 2.0)];
        let table = pupil_table(&records).unwrap();
        assert_eq!(table.column_names(), PUPIL_HEADER_3D);

        let rows: Vec<Vec<f64>> = table.rows().collect();
        assert_eq!(rows[0][4], 3.1);
        assert!(rows[1][4].is_nan());
        assert!(rows[1][5].is_nan());
    }

    #[test]
    fn test_pupil_first_record_needs_model_confidence() {
        let mut first = pupil(0.0, 1.0).with_3d(3.0, 0.8);
        first.model_confidence = None;

        assert!(matches!(
            pupil_table(&[first, pupil(0.0, 2.0).with_3d(3.1, 0.8)]),
            Err(RecordingError::MalformedRecord {
                series: "pupil_positions",
                index: 0,
                field: "model_confidence",
            })
        ));
    }

    #[test]
    fn test_pupil_later_record_without_model_confidence_gets_nan() {
        let mut second = pupil(0.0, 2.0).with_3d(3.1, 0.8);
        second.model_confidence = None;

        let table = pupil_table(&[pupil(0.0, 1.0).with_3d(3.0, 0.8), second]).unwrap();
        let rows: Vec<Vec<f64>> = table.rows().collect();
        assert_eq!(rows[1][4], 3.1);
        assert!(rows[1][5].is_nan());
    }

    #[test]
    fn test_pupil_3d_on_later_record_is_ignored() {
        let records = vec![pupil(0.0, 1.0), pupil(0.0, 2.0).with_3d(3.1, 0.8)];
        let table = pupil_table(&records).unwrap();
        assert_eq!(table.column_count(), PUPIL_HEADER_2D.len());
    }

    #[test]
    fn test_empty_pupil_series() {
        assert!(matches!(
            pupil_table(&[]),
            Err(RecordingError::EmptySeries("pupil_positions"))
        ));
    }

    #[test]
    fn test_gaze_uses_first_base_datum() {
        let gaze = GazeDatum {
            base_data: vec![BaseDatum { id: 1.0 }, BaseDatum { id: 0.0 }],
            timestamp: 5.0,
            norm_pos: [0.1, 0.2],
            confidence: 0.7,
        };
        let table = gaze_table(&[gaze]).unwrap();
        assert_eq!(table.column_names(), GAZE_HEADER);
        assert_eq!(table.rows().next().unwrap(), vec![1.0, 5.0, 0.1, 0.2, 0.7]);
    }

    #[test]
    fn test_gaze_without_base_data() {
        let good = GazeDatum {
            base_data: vec![BaseDatum { id: 0.0 }],
            timestamp: 1.0,
            norm_pos: [0.5, 0.5],
            confidence: 1.0,
        };
        let bad = GazeDatum {
            base_data: Vec::new(),
            ..good.clone()
        };
        assert!(matches!(
            gaze_table(&[good, bad]),
            Err(RecordingError::MissingBaseData { index: 1 })
        ));
    }

    #[test]
    fn test_suffixed_keeps_directories() {
        assert_eq!(
            suffixed(Path::new("out/subject01"), "_gaze.csv"),
            PathBuf::from("out/subject01_gaze.csv")
        );
    }
}
