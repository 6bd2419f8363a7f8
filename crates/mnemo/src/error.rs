//! Unified error type for the server crate.

use mnemo_protocol::ProtocolError;
use mnemo_transport::TransportError;

/// Top-level error for building and running the server.
///
/// Client-input failures (unknown room, wrong turn, bad card) never
/// appear here; those are answered with an `error` message and leave
/// the process running. This type is for the fatal paths: binding,
/// accepting, and encoding outbound traffic.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// A transport-level error (bind, accept, send, recv).
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// A protocol-level error (encoding an outbound message).
    #[error(transparent)]
    Protocol(#[from] ProtocolError),
}
