// Copyright 2025 Pupil Chat Developers
// SPDX-License-Identifier: Apache-2.0

//! Connection setup, probing and teardown
//!
//! Pupil Remote is a ZMQ REP socket, so every request must be followed by
//! exactly one reply before the next request can be sent. Only the initial
//! probe is bounded by a timeout; every later receive blocks until the
//! device answers.

use std::fmt;
use std::time::Duration;

use pupil_config::RemoteConfig;
use tracing::{debug, info, warn};

use crate::error::{RemoteError, RemoteResult};

/// Time query; also used as the liveness probe
pub const TIME_QUERY: &str = "t";

/// An open Pupil Remote connection: the REQ channel and the context owning it
///
/// The channel is declared before the context so that dropping a connection
/// closes the socket before the context is terminated.
pub struct RemoteConnection {
    socket: zmq::Socket,
    context: zmq::Context,
    address: String,
}

/// Connect to Pupil Remote at `address` and probe it with the default settings
///
/// See [`check_connection_with`].
pub fn check_connection(address: &str) -> RemoteResult<(bool, RemoteConnection)> {
    check_connection_with(&RemoteConfig::new(address))
}

/// Connect to Pupil Remote and probe it with a time query
///
/// Returns `(connected, connection)`. When no reply arrives within
/// `config.probe_timeout_ms` the flag is `false` and the connection is left
/// waiting for a reply that never came: it must not be used for further
/// requests, only closed.
///
/// # Errors
///
/// Socket creation and connect failures (e.g. a malformed address) are
/// errors; an unresponsive device is not.
pub fn check_connection_with(config: &RemoteConfig) -> RemoteResult<(bool, RemoteConnection)> {
    let context = zmq::Context::new();
    let socket = context.socket(zmq::REQ)?;
    socket.set_linger(config.linger_ms)?;
    socket
        .connect(&config.address)
        .map_err(|source| RemoteError::ConnectFailed {
            address: config.address.clone(),
            source,
        })?;

    info!("[PUPIL-REMOTE] Connecting to {}", config.address);

    let connection = RemoteConnection {
        socket,
        context,
        address: config.address.clone(),
    };
    let connected = connection.probe(config.probe_timeout())?;

    Ok((connected, connection))
}

impl fmt::Debug for RemoteConnection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RemoteConnection")
            .field("address", &self.address)
            .finish_non_exhaustive()
    }
}

impl RemoteConnection {
    /// Endpoint this connection was opened against
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Send the time query and wait at most `timeout` for the reply
    fn probe(&self, timeout: Duration) -> RemoteResult<bool> {
        let mut poll_items = [self.socket.as_poll_item(zmq::POLLIN)];

        self.send_request(TIME_QUERY)?;
        zmq::poll(&mut poll_items, timeout.as_millis() as i64)?;

        if !poll_items[0].is_readable() {
            warn!(
                "[PUPIL-REMOTE] No reply from {} within {:?}",
                self.address, timeout
            );
            return Ok(false);
        }

        // REQ sockets require the reply to be read before the next request
        let device_time = self.recv_reply()?;
        info!(
            "[PUPIL-REMOTE] Connected to {} (device time {})",
            self.address, device_time
        );
        Ok(true)
    }

    /// Close the channel, then terminate the context
    ///
    /// Consumes the connection, so it cannot be used or closed again.
    pub fn close(self) {
        let RemoteConnection {
            socket,
            context,
            address,
        } = self;

        drop(socket);
        drop(context);

        info!("[PUPIL-REMOTE] Closed connection to {}", address);
    }

    /// Send a single-frame request
    pub(crate) fn send_request(&self, request: &str) -> RemoteResult<()> {
        debug!("[PUPIL-REMOTE] -> {:?}", request);
        self.socket.send(request.as_bytes(), 0)?;
        Ok(())
    }

    /// Send a two-frame request: `first` flagged with more-parts, then `last`
    pub(crate) fn send_two_part(&self, first: &[u8], last: &[u8]) -> RemoteResult<()> {
        self.socket.send(first, zmq::SNDMORE)?;
        self.socket.send(last, 0)?;
        Ok(())
    }

    /// Block until the reply arrives and throw it away
    pub(crate) fn discard_reply(&self) -> RemoteResult<()> {
        let reply = self.socket.recv_bytes(0)?;
        debug!("[PUPIL-REMOTE] <- ({} bytes, discarded)", reply.len());
        Ok(())
    }

    /// Block until the reply arrives and return it as text
    pub(crate) fn recv_reply(&self) -> RemoteResult<String> {
        let reply = self.socket.recv_string(0)?.map_err(RemoteError::InvalidReply)?;
        debug!("[PUPIL-REMOTE] <- {:?}", reply);
        Ok(reply)
    }

    /// Send one request and return the reply text
    pub(crate) fn request(&self, request: &str) -> RemoteResult<String> {
        self.send_request(request)?;
        self.recv_reply()
    }
}
