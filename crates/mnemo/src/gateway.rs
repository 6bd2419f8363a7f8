//! Per-connection gateway: identity push, action dispatch, broadcasts,
//! and disconnect-driven room termination.
//!
//! Each accepted connection gets its own Tokio task running
//! [`handle_connection`]. The flow is:
//!   1. Register an outbound queue in the peer registry
//!   2. Push `welcome` with the assigned player id
//!   3. Loop: decode actions → commit under the store lock → fan out
//!   4. On close: terminate the player's rooms, notify survivors,
//!      schedule deletion after the grace period
//!
//! Every action is answered on the actor's own queue BEFORE any
//! broadcast is enqueued, so the actor always observes its reply first.

use std::sync::Arc;

use mnemo_engine::{FlipError, PlayerId, Room, RoomId, turn};
use mnemo_protocol::{ClientMessage, Codec, ServerMessage};
use mnemo_transport::{Connection, WebSocketConnection};
use tokio::sync::mpsc;

use crate::ServerError;
use crate::server::{DEFAULT_FRONTEND_URL, ServerState};

/// Handles a single connection from accept to close.
pub(crate) async fn handle_connection(
    conn: WebSocketConnection,
    state: Arc<ServerState>,
) -> Result<(), ServerError> {
    // Connection ids are process-unique, so they double as player ids.
    let player_id = PlayerId(conn.id().into_inner());
    let conn = Arc::new(conn);

    let (tx, mut rx) = mpsc::unbounded_channel::<ServerMessage>();
    state.peers.lock().await.insert(player_id, tx.clone());

    // Writer task: drains the outbound queue onto the socket, so
    // broadcasts from other connections never block on this one.
    let writer_conn = Arc::clone(&conn);
    let codec = state.codec;
    let writer = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            let bytes = codec.encode(&msg)?;
            if writer_conn.send(&bytes).await.is_err() {
                break;
            }
        }
        Ok::<(), ServerError>(())
    });

    tracing::info!(%player_id, origin = ?conn.origin(), "player connected");
    let _ = tx.send(ServerMessage::Welcome { player_id });

    loop {
        match conn.recv().await {
            Ok(Some(data)) => {
                let msg: ClientMessage = match state.codec.decode(&data) {
                    Ok(msg) => msg,
                    Err(e) => {
                        tracing::debug!(
                            %player_id, error = %e, "undecodable action"
                        );
                        let _ = tx.send(ServerMessage::Error {
                            message: format!("invalid message: {e}"),
                        });
                        continue;
                    }
                };
                dispatch(&state, player_id, conn.origin(), &tx, msg).await;
            }
            Ok(None) => {
                tracing::info!(%player_id, "connection closed cleanly");
                break;
            }
            Err(e) => {
                tracing::debug!(%player_id, error = %e, "recv error");
                break;
            }
        }
    }

    disconnect(&state, player_id).await;

    // All senders are gone now (registry entry removed, local clone
    // dropped), so the writer drains whatever is queued and exits.
    drop(tx);
    if let Ok(result) = writer.await {
        result?;
    }

    Ok(())
}

/// Routes one decoded action. Rejections become an `error` reply on
/// the actor's queue; no other member hears about them.
async fn dispatch(
    state: &Arc<ServerState>,
    player_id: PlayerId,
    origin: Option<&str>,
    tx: &mpsc::UnboundedSender<ServerMessage>,
    msg: ClientMessage,
) {
    let outcome = match msg {
        ClientMessage::CreateRoom { player_name } => {
            create_room(state, player_id, origin, tx, &player_name).await
        }
        ClientMessage::JoinRoom {
            room_id,
            player_name,
        } => join_room(state, player_id, tx, &room_id, &player_name).await,
        ClientMessage::JoinRandom { player_name } => {
            join_random(state, player_id, tx, &player_name).await
        }
        ClientMessage::FlipCard {
            room_id,
            card_index,
        } => flip_card(state, player_id, tx, &room_id, card_index).await,
    };

    if let Err(message) = outcome {
        tracing::debug!(%player_id, %message, "action rejected");
        let _ = tx.send(ServerMessage::Error { message });
    }
}

async fn create_room(
    state: &Arc<ServerState>,
    player_id: PlayerId,
    origin: Option<&str>,
    tx: &mpsc::UnboundedSender<ServerMessage>,
    player_name: &str,
) -> Result<(), String> {
    let name = name_or(player_name, "Host");
    let room = {
        let mut store = state.store.lock().await;
        store.create_room(player_id, &name).clone()
    };

    let invite_link = invite_link(state, origin, &room.id);
    let _ = tx.send(ServerMessage::RoomCreated {
        room_id: room.id.clone(),
        room,
        invite_link,
    });
    Ok(())
}

async fn join_room(
    state: &Arc<ServerState>,
    player_id: PlayerId,
    tx: &mpsc::UnboundedSender<ServerMessage>,
    room_id: &RoomId,
    player_name: &str,
) -> Result<(), String> {
    let name = name_or(player_name, "Guest");
    let room = {
        let mut store = state.store.lock().await;
        store
            .join_room(room_id, player_id, &name)
            .map_err(|e| e.to_string())?
            .clone()
    };

    let _ = tx.send(ServerMessage::RoomJoined { room: room.clone() });
    broadcast(state, &room, ServerMessage::RoomUpdate { room: room.clone() })
        .await;
    Ok(())
}

async fn join_random(
    state: &Arc<ServerState>,
    player_id: PlayerId,
    tx: &mpsc::UnboundedSender<ServerMessage>,
    player_name: &str,
) -> Result<(), String> {
    let name = name_or(player_name, "Guest");
    let outcome = {
        let mut store = state.store.lock().await;
        store
            .join_random(player_id, &name)
            .map_err(|e| e.to_string())?
    };

    let room = outcome.room;
    let _ = tx.send(ServerMessage::RandomJoined {
        room: room.clone(),
        waiting: !outcome.matched,
    });
    broadcast(state, &room, ServerMessage::RoomUpdate { room: room.clone() })
        .await;
    if outcome.matched {
        broadcast(
            state,
            &room,
            ServerMessage::GameStarted { room: room.clone() },
        )
        .await;
    }
    Ok(())
}

async fn flip_card(
    state: &Arc<ServerState>,
    player_id: PlayerId,
    tx: &mpsc::UnboundedSender<ServerMessage>,
    room_id: &RoomId,
    card_index: usize,
) -> Result<(), String> {
    // Resolve the whole flip under one store lock: no client can
    // observe a half-resolved pair.
    let (room, resolution) = {
        let mut store = state.store.lock().await;
        let config = store.config().clone();
        let room = store
            .room_mut(room_id)
            .ok_or_else(|| FlipError::InvalidRoom.to_string())?;
        let resolution = turn::apply_flip(room, player_id, card_index, &config)
            .map_err(|e| e.to_string())?;
        (room.clone(), resolution)
    };

    let _ = tx.send(ServerMessage::FlipResult {
        room: room.clone(),
        matched: resolution.matched,
        flip_back: resolution.flip_back.clone(),
        game_over: resolution.game_over,
        winner: room.winner,
    });
    broadcast(
        state,
        &room,
        ServerMessage::GameState {
            room: room.clone(),
            matched: resolution.matched,
            flip_back: resolution.flip_back,
            game_over: resolution.game_over,
            winner: room.winner,
        },
    )
    .await;
    Ok(())
}

/// Resolves a dropped connection: every room the player belongs to is
/// terminated in their opponent's favor, survivors are notified, and
/// each room is scheduled for deletion after the grace period.
async fn disconnect(state: &Arc<ServerState>, player_id: PlayerId) {
    // Remove the peer entry first so the departing player is excluded
    // from the broadcasts below.
    state.peers.lock().await.remove(&player_id);

    let room_ids = { state.store.lock().await.rooms_of(player_id) };
    for room_id in room_ids {
        let room = {
            let mut store = state.store.lock().await;
            store.leave_room(&room_id, player_id).cloned()
        };
        let Some(room) = room else { continue };

        broadcast(
            state,
            &room,
            ServerMessage::PlayerLeft {
                room: room.clone(),
                left_player_id: player_id,
            },
        )
        .await;

        // Fire-and-forget purge: the room stays readable for the grace
        // period, then disappears along with any stale queue entry.
        let state = Arc::clone(state);
        tokio::spawn(async move {
            tokio::time::sleep(state.cleanup_grace).await;
            state.store.lock().await.delete_room(&room_id);
        });
    }

    tracing::info!(%player_id, "player disconnected");
}

/// Fans a message out to every room member with a live connection.
/// Takes the peers lock only, never while the store lock is held.
async fn broadcast(state: &ServerState, room: &Room, msg: ServerMessage) {
    let peers = state.peers.lock().await;
    for player in &room.players {
        if let Some(tx) = peers.get(&player.id) {
            let _ = tx.send(msg.clone());
        }
    }
}

fn invite_link(
    state: &ServerState,
    origin: Option<&str>,
    room_id: &RoomId,
) -> String {
    let base = state
        .frontend_url
        .as_deref()
        .or(origin)
        .unwrap_or(DEFAULT_FRONTEND_URL);
    format!("{base}/play?room={room_id}")
}

fn name_or(name: &str, fallback: &str) -> String {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        fallback.to_string()
    } else {
        trimmed.to_string()
    }
}
