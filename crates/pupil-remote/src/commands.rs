// Copyright 2025 Pupil Chat Developers
// SPDX-License-Identifier: Apache-2.0

//! Pupil Remote requests
//!
//! | Request | Reply |
//! |---|---|
//! | `t` | current device time |
//! | `T <value>` | acknowledgement (ignored) |
//! | any other command, e.g. `R` / `r` | acknowledgement (ignored) |
//! | `notify.annotation` + MessagePack payload | acknowledgement (ignored) |

use std::time::{Duration, Instant};

use tracing::{debug, info};

use crate::annotation::Annotation;
use crate::connection::{RemoteConnection, TIME_QUERY};
use crate::error::RemoteResult;

impl RemoteConnection {
    /// Send a device command and consume its reply
    ///
    /// The reply is discarded, including any error the device reports in it.
    ///
    /// # Example
    /// ```no_run
    /// # use pupil_remote::check_connection;
    /// let (connected, connection) = check_connection("tcp://127.0.0.1:50020")?;
    /// assert!(connected);
    /// connection.send_command("R")?; // start recording
    /// connection.send_command("r")?; // stop recording
    /// # Ok::<(), pupil_remote::RemoteError>(())
    /// ```
    pub fn send_command(&self, command: &str) -> RemoteResult<()> {
        self.send_request(command)?;
        self.discard_reply()
    }

    /// Set the device clock to `timestamp`, then read the clock back
    ///
    /// The returned value is the device time reported right after the change.
    /// Nothing stops the clock from advancing between the two round trips.
    pub fn clock_change(&self, timestamp: &str) -> RemoteResult<String> {
        self.send_command(&format!("T {}", timestamp))?;
        let device_time = self.get_time()?;
        info!(
            "[PUPIL-REMOTE] Clock set to {}, device reports {}",
            timestamp, device_time
        );
        Ok(device_time)
    }

    /// Current device time, verbatim
    pub fn get_time(&self) -> RemoteResult<String> {
        self.request(TIME_QUERY)
    }

    /// Wall-clock duration of one time-query round trip
    pub fn check_timing(&self) -> RemoteResult<Duration> {
        let started = Instant::now();
        self.request(TIME_QUERY)?;
        let elapsed = started.elapsed();
        debug!("[PUPIL-REMOTE] Time query round trip: {:?}", elapsed);
        Ok(elapsed)
    }

    /// Publish an annotation stamped with the current device time
    ///
    /// Returns the device time the annotation was stamped with.
    pub fn send_annotation(&self, label: &str) -> RemoteResult<String> {
        let device_time = self.get_time()?;

        let annotation = Annotation::new(label, device_time.as_str());
        let payload = annotation.to_msgpack()?;

        // Topic and payload must reach the device as one two-frame message
        self.send_two_part(annotation.topic().as_bytes(), &payload)?;
        self.discard_reply()?;

        debug!(
            "[PUPIL-REMOTE] Annotation {:?} sent at {}",
            label, device_time
        );
        Ok(device_time)
    }
}
