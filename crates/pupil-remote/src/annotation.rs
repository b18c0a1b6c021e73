// Copyright 2025 Pupil Chat Developers
// SPDX-License-Identifier: Apache-2.0

//! Annotation notifications
//!
//! Pupil Capture routes `notify.<subject>` messages received on Pupil Remote
//! to its internal IPC backbone. An annotation is published as a two-frame
//! message: the topic string, then the MessagePack-encoded notification map.

use serde::{Deserialize, Serialize};

use crate::error::RemoteResult;

/// Subject of every annotation notification
pub const ANNOTATION_SUBJECT: &str = "annotation";

/// Source tag Pupil Capture shows for annotations sent by this client
pub const ANNOTATION_SOURCE: &str = "matlab";

/// Annotation notification
///
/// Field order is the key order of the encoded map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    pub subject: String,
    pub label: String,
    /// Device timestamp, kept in the string form Pupil Remote replied with
    pub timestamp: String,
    pub duration: u32,
    pub source: String,
    /// Ask Pupil Capture to store the annotation in the active recording
    pub record: bool,
}

impl Annotation {
    /// Zero-duration annotation marked for recording
    pub fn new(label: impl Into<String>, timestamp: impl Into<String>) -> Self {
        Self {
            subject: ANNOTATION_SUBJECT.to_string(),
            label: label.into(),
            timestamp: timestamp.into(),
            duration: 0,
            source: ANNOTATION_SOURCE.to_string(),
            record: true,
        }
    }

    /// Topic frame, `notify.` followed by the subject
    pub fn topic(&self) -> String {
        format!("notify.{}", self.subject)
    }

    /// Encode as a MessagePack map with string keys
    pub fn to_msgpack(&self) -> RemoteResult<Vec<u8>> {
        Ok(rmp_serde::to_vec_named(self)?)
    }
}
