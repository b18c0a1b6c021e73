// Copyright 2025 Pupil Chat Developers
// SPDX-License-Identifier: Apache-2.0

//! Error types for the Pupil Remote client

/// Result type alias for remote operations
pub type RemoteResult<T> = Result<T, RemoteError>;

/// Errors raised while talking to Pupil Remote
///
/// A probe that gets no reply is not an error: [`crate::check_connection`]
/// reports it through its boolean flag.
#[derive(Debug, thiserror::Error)]
pub enum RemoteError {
    /// Socket creation, send, receive or poll failed
    #[error("ZMQ error: {0}")]
    Zmq(#[from] zmq::Error),

    /// The endpoint could not be connected to (malformed address, unknown transport)
    #[error("Failed to connect to {address}: {source}")]
    ConnectFailed {
        address: String,
        #[source]
        source: zmq::Error,
    },

    /// A reply that is read as text was not valid UTF-8
    #[error("Reply is not valid UTF-8 ({} bytes)", .0.len())]
    InvalidReply(Vec<u8>),

    /// Annotation payload could not be MessagePack-encoded
    #[error("Failed to encode annotation: {0}")]
    Encode(#[from] rmp_serde::encode::Error),
}
