//! Pure rules core for the mnemo memory game.
//!
//! Everything in this crate is synchronous, in-memory computation:
//! no I/O, no shared state, no async. The network layer calls into it
//! and commits the results.
//!
//! # Key pieces
//!
//! - [`deck::generate`] — produces a shuffled deck of paired symbol cards
//! - [`turn::apply_flip`] — the authoritative state-transition function
//! - [`Room`], [`Player`], [`Card`] — the wire-visible data model
//! - [`GameConfig`] — scoring and deck-size settings

mod config;
pub mod deck;
mod model;
pub mod turn;

pub use config::{GameConfig, SYMBOLS};
pub use model::{Card, Player, PlayerId, Room, RoomId, RoomStatus};
pub use turn::{FlipError, FlipResolution};
