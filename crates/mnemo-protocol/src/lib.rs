//! Wire protocol for the mnemo game server.
//!
//! This crate defines the messages clients and server exchange:
//!
//! - **Types** ([`ClientMessage`], [`ServerMessage`]) — the four client
//!   actions plus the replies and room broadcasts they produce.
//! - **Codec** ([`Codec`] trait, [`JsonCodec`]) — how messages are
//!   converted to/from bytes.
//! - **Errors** ([`ProtocolError`]) — what can go wrong while doing so.
//!
//! Every message is a single internally-tagged JSON object whose
//! `type` field is the kebab-case action/event name (`"flip-card"`,
//! `"game-state"`, ...). There is no envelope or sequencing metadata:
//! the surface is plain request → reply plus room broadcasts, carried
//! over an ordered transport.

mod codec;
mod error;
mod types;

pub use codec::Codec;
#[cfg(feature = "json")]
pub use codec::JsonCodec;
pub use error::ProtocolError;
pub use types::{ClientMessage, ServerMessage};

// Identity types live with the data model; re-exported here so the
// gateway and tests can import the whole wire surface from one place.
pub use mnemo_engine::{PlayerId, Room, RoomId};
