//! Room lifecycle management for the mnemo game server.
//!
//! [`RoomStore`] owns every active room and the FIFO waiting queue for
//! random matchmaking. It is plain owned data with no interior locking:
//! the gateway serializes access behind a single mutex, which gives
//! each room linearizable validate → transition → commit semantics
//! without per-room synchronization.
//!
//! # Key types
//!
//! - [`RoomStore`] — creates/joins/terminates/deletes rooms
//! - [`WaitingEntry`] — a solo room queued for random pairing
//! - [`StoreError`] — why a create/join was rejected

mod error;
mod store;

pub use error::StoreError;
pub use store::{RandomMatch, RoomStore, WaitingEntry};
