// Copyright 2025 Pupil Chat Developers
// SPDX-License-Identifier: Apache-2.0

//! Recorded sample types
//!
//! Only the fields the export needs are modelled. Anything else a recording
//! carries (ellipse fits, topics, notifications, ...) is skipped while
//! decoding.

use serde::{Deserialize, Serialize};

/// Top level of a recording file
///
/// Both series are optional at the type level so that a missing key is
/// reported by name instead of as a generic decode failure.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Recording {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pupil_positions: Option<Vec<PupilDatum>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gaze_positions: Option<Vec<GazeDatum>>,
}

/// One pupil detection
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PupilDatum {
    /// Eye id
    pub id: f64,
    pub timestamp: f64,
    pub diameter: f64,
    pub confidence: f64,
    /// Normalized (x, y) position
    pub norm_pos: [f64; 2],
    /// Only present when the 3D detector was running
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diameter_3d: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_confidence: Option<f64>,
}

impl PupilDatum {
    /// 2D-only detection
    pub fn new(id: f64, timestamp: f64, diameter: f64, confidence: f64, norm_pos: [f64; 2]) -> Self {
        Self {
            id,
            timestamp,
            diameter,
            confidence,
            norm_pos,
            diameter_3d: None,
            model_confidence: None,
        }
    }

    /// Attach 3D model output
    pub fn with_3d(mut self, diameter_3d: f64, model_confidence: f64) -> Self {
        self.diameter_3d = Some(diameter_3d);
        self.model_confidence = Some(model_confidence);
        self
    }
}

/// One gaze mapping result
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct GazeDatum {
    /// Pupil data the gaze point was mapped from; the first entry identifies it
    pub base_data: Vec<BaseDatum>,
    pub timestamp: f64,
    pub norm_pos: [f64; 2],
    pub confidence: f64,
}

/// Reference to a pupil datum inside a gaze record
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct BaseDatum {
    pub id: f64,
}
