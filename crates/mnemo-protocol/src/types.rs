//! Message types for the client ↔ server surface.
//!
//! Field names are camelCase and tags are kebab-case on the wire so a
//! JavaScript front end consumes snapshots and events without any
//! mapping layer. `Room` snapshots are embedded whole; the rendering
//! layer reconciles to them and must not infer game rules on its own.

use mnemo_engine::{PlayerId, Room, RoomId};
use serde::{Deserialize, Serialize};

/// Actions a client can send.
///
/// Every action is answered with exactly one [`ServerMessage`]: the
/// matching success reply, or `error`. Never both, never neither.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case", rename_all_fields = "camelCase")]
pub enum ClientMessage {
    /// Open a new invite-link room with the sender as host.
    CreateRoom { player_name: String },

    /// Join a specific room by id (from an invite link).
    JoinRoom { room_id: RoomId, player_name: String },

    /// Join the FIFO random-match queue (or be paired immediately).
    JoinRandom { player_name: String },

    /// Flip one card in a room the sender is playing in.
    FlipCard { room_id: RoomId, card_index: usize },
}

/// Everything the server can send: the identity push, per-action
/// replies (actor only), and room broadcasts (every member).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case", rename_all_fields = "camelCase")]
pub enum ServerMessage {
    /// Pushed once, immediately after the connection is accepted. The
    /// client uses this id to find itself in room snapshots.
    Welcome { player_id: PlayerId },

    /// Reply to `create-room`.
    RoomCreated {
        room_id: RoomId,
        room: Room,
        invite_link: String,
    },

    /// Reply to `join-room`.
    RoomJoined { room: Room },

    /// Reply to `join-random`. `waiting` is `true` when the sender was
    /// enqueued rather than paired.
    RandomJoined { room: Room, waiting: bool },

    /// Reply to `flip-card`. Same payload as the `game-state`
    /// broadcast the rest of the room receives.
    FlipResult {
        room: Room,
        #[serde(rename = "match")]
        matched: Option<bool>,
        flip_back: Vec<usize>,
        game_over: bool,
        winner: Option<PlayerId>,
    },

    /// Broadcast: the room's membership changed (someone joined).
    RoomUpdate { room: Room },

    /// Broadcast: a random match filled the room and play has begun.
    GameStarted { room: Room },

    /// Broadcast: a flip was committed; this is the authoritative
    /// state every client reconciles to.
    GameState {
        room: Room,
        #[serde(rename = "match")]
        matched: Option<bool>,
        flip_back: Vec<usize>,
        game_over: bool,
        winner: Option<PlayerId>,
    },

    /// Broadcast: a player's connection dropped; the room is finished
    /// and `room.winnerByDisconnect` names the survivor.
    PlayerLeft { room: Room, left_player_id: PlayerId },

    /// Reply: the action was rejected. The room it targeted is
    /// untouched, and no other member hears about it.
    Error { message: String },
}
