//! Error types for the room store.

use mnemo_engine::RoomId;

/// Why a room operation was rejected.
///
/// Every variant is a client-input validation failure: the store is
/// left exactly as it was, and the message is surfaced verbatim to the
/// acting client.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum StoreError {
    /// No room with that id.
    #[error("room {0} not found")]
    NotFound(RoomId),

    /// The room already has two players.
    #[error("room {0} is full")]
    RoomFull(RoomId),

    /// The room has left `waiting` status; joins are only valid
    /// pre-start.
    #[error("game already started in room {0}")]
    AlreadyStarted(RoomId),
}
