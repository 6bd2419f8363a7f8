//! # mnemo
//!
//! Authoritative game-session server for the mnemo memory-matching
//! game: the server-side room/turn state machine that accepts
//! card-flip actions from networked clients, validates turn legality,
//! resolves matches, applies scoring, detects termination, and
//! broadcasts authoritative state to all participants.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use mnemo::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), ServerError> {
//!     let server = MnemoServerBuilder::new()
//!         .bind("0.0.0.0:3001")
//!         .build()
//!         .await?;
//!     server.run().await
//! }
//! ```

mod error;
mod gateway;
mod server;

pub use error::ServerError;
pub use server::{MnemoServer, MnemoServerBuilder};

/// Everything needed to run a server or talk to one from tests.
pub mod prelude {
    pub use crate::{MnemoServer, MnemoServerBuilder, ServerError};
    pub use mnemo_engine::{GameConfig, PlayerId, Room, RoomId, RoomStatus};
    pub use mnemo_protocol::{ClientMessage, Codec, JsonCodec, ServerMessage};
}
