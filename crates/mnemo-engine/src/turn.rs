//! The turn engine: the authoritative flip-resolution function.
//!
//! [`apply_flip`] is the only code that mutates a playing room's deck,
//! scores, turn index, or status. The gateway calls it while holding
//! the store lock, so every transition is atomic from the clients'
//! point of view: there is no half-resolved pair to observe.

use crate::config::GameConfig;
use crate::model::{PlayerId, Room, RoomStatus};

/// What a successful flip resolved to.
///
/// Serialized shapes of these fields ride along in the `flip-result`
/// reply and `game-state` broadcast, so they mirror the wire names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlipResolution {
    /// `None` after the first flip of a pair, `Some(true)` on a match,
    /// `Some(false)` on a mismatch.
    pub matched: Option<bool>,
    /// The two indices to visually revert after a mismatch; empty
    /// otherwise.
    pub flip_back: Vec<usize>,
    /// `true` when this flip finished the game.
    pub game_over: bool,
}

impl FlipResolution {
    fn pending() -> Self {
        Self {
            matched: None,
            flip_back: Vec::new(),
            game_over: false,
        }
    }
}

/// Why a flip was rejected. Every rejection is a no-op: the room is
/// left exactly as it was.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum FlipError {
    /// The room is not in `playing` status.
    #[error("invalid room or game not active")]
    InvalidRoom,

    /// The acting player does not own the current turn (or turn
    /// ownership is undefined because the room has one player).
    #[error("not your turn")]
    NotYourTurn,

    /// The card index is out of range, already matched, or already
    /// face-up in the pending pair.
    #[error("invalid card: {0}")]
    InvalidCard(&'static str),
}

/// Applies one card flip to `room` on behalf of `player`.
///
/// Preconditions are checked in order (room status, turn ownership,
/// card validity), each with a distinct error. On the first flip of a
/// pair the card is recorded and nothing else changes. On the second
/// flip the pair is resolved synchronously:
///
/// - **match**: both cards become permanently matched and the acting
///   player keeps the turn (a core rule, not incidental);
/// - **mismatch**: the acting player pays the penalty (floored at 0)
///   and the turn passes to the other player.
///
/// The game finishes when all cards are matched or a score reaches
/// exactly 0; `room.winner` is decided here and never recomputed.
pub fn apply_flip(
    room: &mut Room,
    player: PlayerId,
    card_index: usize,
    config: &GameConfig,
) -> Result<FlipResolution, FlipError> {
    if room.status != RoomStatus::Playing {
        return Err(FlipError::InvalidRoom);
    }
    if !room.is_current_turn(player) {
        return Err(FlipError::NotYourTurn);
    }
    let card = room
        .deck
        .get(card_index)
        .ok_or(FlipError::InvalidCard("no card at that index"))?;
    if card.matched {
        return Err(FlipError::InvalidCard("card already matched"));
    }
    if room.flipped_indices.contains(&card_index) {
        return Err(FlipError::InvalidCard("card already face-up"));
    }

    room.flipped_indices.push(card_index);
    if room.flipped_indices.len() < 2 {
        return Ok(FlipResolution::pending());
    }

    let first = room.flipped_indices[0];
    let second = room.flipped_indices[1];
    room.flipped_indices.clear();

    if room.deck[first].symbol == room.deck[second].symbol {
        room.deck[first].matched = true;
        room.deck[second].matched = true;

        let game_over = room.all_matched();
        if game_over {
            finish(room);
        }
        Ok(FlipResolution {
            matched: Some(true),
            flip_back: Vec::new(),
            game_over,
        })
    } else {
        let acting = room.current_turn_player_index;
        let score = &mut room.players[acting].score;
        *score = score.saturating_sub(config.penalty);

        // All-matched can only be reached through a match, but both
        // conditions are checked to keep parity with the local-mode
        // rules.
        let game_over = room.players[acting].score == 0 || room.all_matched();
        if game_over {
            finish(room);
        }
        room.current_turn_player_index = (acting + 1) % room.players.len();

        Ok(FlipResolution {
            matched: Some(false),
            flip_back: vec![first, second],
            game_over,
        })
    }
}

/// Marks the room finished and decides the winner from final scores:
/// higher score wins, equal scores is a draw.
fn finish(room: &mut Room) {
    room.status = RoomStatus::Finished;
    room.winner = decide_winner(room);
}

fn decide_winner(room: &Room) -> Option<PlayerId> {
    let [a, b] = room.players.as_slice() else {
        return None;
    };
    match a.score.cmp(&b.score) {
        std::cmp::Ordering::Greater => Some(a.id),
        std::cmp::Ordering::Less => Some(b.id),
        std::cmp::Ordering::Equal => None,
    }
}
