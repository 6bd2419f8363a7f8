//! The wire-visible data model.
//!
//! Room snapshots are broadcast to clients exactly as stored, so every
//! type here serializes with the field names the front end expects
//! (camelCase structs, lowercase status strings).

use std::fmt;

use serde::{Deserialize, Serialize};

/// A unique identifier for a player.
///
/// Player identity is connection-scoped: the gateway assigns one id per
/// accepted connection and it is never reused for a reconnect. A lost
/// connection always ends that player's session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub u64);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P-{}", self.0)
    }
}

/// A unique identifier for a room.
///
/// Generated as `room-{unix_millis}-{random suffix}` and treated as an
/// opaque string by clients (it travels inside invite links).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomId(pub String);

impl RoomId {
    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RoomId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// One card in a deck.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    /// Stable for the lifetime of a room's deck (`card-0`, `card-1`, ...).
    pub id: String,
    /// The symbol this card shows when face-up.
    pub symbol: char,
    /// Transitions false → true exactly once, never back.
    pub matched: bool,
}

/// One participant in a room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    /// Non-increasing, floored at 0.
    pub score: u32,
    pub is_host: bool,
}

/// The lifecycle state of a room.
///
/// Transitions are strictly `waiting → playing → finished`; a finished
/// room is never mutated by flip actions again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoomStatus {
    Waiting,
    Playing,
    Finished,
}

impl fmt::Display for RoomStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Waiting => f.write_str("waiting"),
            Self::Playing => f.write_str("playing"),
            Self::Finished => f.write_str("finished"),
        }
    }
}

/// One game session: at most two players, a deck, and the pending-flip
/// state the turn engine resolves against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub id: RoomId,
    pub players: Vec<Player>,
    pub deck: Vec<Card>,
    /// 0, 1, or 2 card positions currently face-up pending resolution.
    /// Never left at 2 between client-visible states; a second flip is
    /// resolved synchronously.
    pub flipped_indices: Vec<usize>,
    /// Index into `players`. Only meaningful once both players are in.
    pub current_turn_player_index: usize,
    pub status: RoomStatus,
    /// Terminal outcome, set exactly once when `status` becomes
    /// `finished`. `None` while running, and `None` at the end of a
    /// drawn game. Clients never recompute this.
    pub winner: Option<PlayerId>,
    /// Set instead of a score comparison when the game ended because
    /// the other player's connection dropped.
    pub winner_by_disconnect: Option<PlayerId>,
}

impl Room {
    /// Creates a room in `waiting` status with the host as sole player.
    pub fn new(id: RoomId, host: Player, deck: Vec<Card>) -> Self {
        Self {
            id,
            players: vec![host],
            deck,
            flipped_indices: Vec::new(),
            current_turn_player_index: 0,
            status: RoomStatus::Waiting,
            winner: None,
            winner_by_disconnect: None,
        }
    }

    /// Returns the index of `player` in the player list, if present.
    pub fn player_index(&self, player: PlayerId) -> Option<usize> {
        self.players.iter().position(|p| p.id == player)
    }

    /// Returns `true` if it is `player`'s turn.
    ///
    /// Turn ownership is undefined until both players are present, so
    /// this is always `false` in a one-player room.
    pub fn is_current_turn(&self, player: PlayerId) -> bool {
        self.players.len() == 2
            && self.player_index(player) == Some(self.current_turn_player_index)
    }

    /// Returns `true` once every card has been matched.
    pub fn all_matched(&self) -> bool {
        self.deck.iter().all(|c| c.matched)
    }
}
