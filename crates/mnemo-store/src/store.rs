//! The room store: registry of active rooms plus the matchmaking queue.

use std::collections::{HashMap, VecDeque};
use std::time::{SystemTime, UNIX_EPOCH};

use mnemo_engine::{
    GameConfig, Player, PlayerId, Room, RoomId, RoomStatus, deck,
};
use rand::Rng;
use rand::distr::Alphanumeric;

use crate::StoreError;

/// A single-player room awaiting a second player via random
/// matchmaking. FIFO order determines pairing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WaitingEntry {
    pub room_id: RoomId,
    pub player_id: PlayerId,
}

/// Result of a `join_random` call.
#[derive(Debug, Clone)]
pub struct RandomMatch {
    /// Snapshot of the room the caller ended up in.
    pub room: Room,
    /// `true` if the caller was paired with a queued player; `false`
    /// if they were enqueued to wait.
    pub matched: bool,
}

/// In-memory registry of active game rooms and the waiting queue.
///
/// Process-scoped state created once at startup and injected into the
/// gateway; rooms only leave the map through [`delete_room`], called
/// after the post-termination grace period.
///
/// [`delete_room`]: RoomStore::delete_room
pub struct RoomStore {
    config: GameConfig,
    rooms: HashMap<RoomId, Room>,
    waiting: VecDeque<WaitingEntry>,
}

impl RoomStore {
    /// Creates an empty store using `config` for every room it makes.
    pub fn new(config: GameConfig) -> Self {
        Self {
            config,
            rooms: HashMap::new(),
            waiting: VecDeque::new(),
        }
    }

    /// Returns the game configuration shared by all rooms.
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Creates a new room in `waiting` status with the host as its
    /// only player and a freshly generated deck.
    pub fn create_room(&mut self, host: PlayerId, host_name: &str) -> &Room {
        let room_id = self.fresh_room_id();
        let room = Room::new(
            room_id.clone(),
            Player {
                id: host,
                name: host_name.to_string(),
                score: self.config.starting_score,
                is_host: true,
            },
            deck::generate(self.config.pair_count),
        );
        tracing::info!(%room_id, %host, "room created");
        self.rooms.entry(room_id).or_insert(room)
    }

    /// Adds a second player and starts the game.
    ///
    /// The deck is REGENERATED here: whatever the host may have
    /// observed while waiting is invalidated, so the creator cannot
    /// know the deck before an opponent exists.
    pub fn join_room(
        &mut self,
        room_id: &RoomId,
        player: PlayerId,
        player_name: &str,
    ) -> Result<&Room, StoreError> {
        let room = self
            .rooms
            .get_mut(room_id)
            .ok_or_else(|| StoreError::NotFound(room_id.clone()))?;
        if room.players.len() >= 2 {
            return Err(StoreError::RoomFull(room_id.clone()));
        }
        if room.status != RoomStatus::Waiting {
            return Err(StoreError::AlreadyStarted(room_id.clone()));
        }

        room.players.push(Player {
            id: player,
            name: player_name.to_string(),
            score: self.config.starting_score,
            is_host: false,
        });
        room.status = RoomStatus::Playing;
        room.deck = deck::generate(self.config.pair_count);

        tracing::info!(%room_id, %player, "player joined, game started");
        Ok(room)
    }

    /// Pairs the caller with the oldest queued player, or enqueues
    /// them in a fresh room if the queue is empty.
    ///
    /// If the popped entry's room turns out not to be joinable (the
    /// waiting player raced us out of it), the entry goes back to the
    /// FRONT of the queue and the failure is reported; the waiting
    /// player is never silently dropped.
    pub fn join_random(
        &mut self,
        player: PlayerId,
        player_name: &str,
    ) -> Result<RandomMatch, StoreError> {
        if let Some(entry) = self.waiting.pop_front() {
            return match self.join_room(&entry.room_id, player, player_name) {
                Ok(room) => Ok(RandomMatch {
                    room: room.clone(),
                    matched: true,
                }),
                Err(e) => {
                    self.waiting.push_front(entry);
                    Err(e)
                }
            };
        }

        let room = self.create_room(player, player_name).clone();
        self.waiting.push_back(WaitingEntry {
            room_id: room.id.clone(),
            player_id: player,
        });
        tracing::info!(room_id = %room.id, %player, "queued for random match");
        Ok(RandomMatch {
            room,
            matched: false,
        })
    }

    /// Returns the room with the given id, if it exists.
    pub fn get(&self, room_id: &RoomId) -> Option<&Room> {
        self.rooms.get(room_id)
    }

    /// Mutable access for the turn engine. Only the gateway calls this,
    /// under the store lock.
    pub fn room_mut(&mut self, room_id: &RoomId) -> Option<&mut Room> {
        self.rooms.get_mut(room_id)
    }

    /// Every room the player currently belongs to. Used to resolve a
    /// dropped connection.
    pub fn rooms_of(&self, player: PlayerId) -> Vec<RoomId> {
        self.rooms
            .values()
            .filter(|r| r.player_index(player).is_some())
            .map(|r| r.id.clone())
            .collect()
    }

    /// Terminates a room because `player` left it.
    ///
    /// Marks the room finished with the *other* player as
    /// winner-by-disconnect, and purges any queue entry for this
    /// player/room pair (the departing player may still have been
    /// waiting for a match). A room that already finished keeps its
    /// recorded outcome; terminal results are stable.
    ///
    /// Returns the terminal room state, or `None` for an unknown room.
    pub fn leave_room(&mut self, room_id: &RoomId, player: PlayerId) -> Option<&Room> {
        self.remove_from_queue(room_id, player);

        let room = self.rooms.get_mut(room_id)?;
        if room.status != RoomStatus::Finished {
            room.status = RoomStatus::Finished;
            let survivor = room.players.iter().find(|p| p.id != player).map(|p| p.id);
            room.winner_by_disconnect = survivor;
            room.winner = survivor;
            tracing::info!(%room_id, left = %player, "room finished by disconnect");
        }
        Some(room)
    }

    /// Purges the room and any stale queue entry pointing at it.
    /// Called after the grace period following termination.
    pub fn delete_room(&mut self, room_id: &RoomId) {
        if self.rooms.remove(room_id).is_some() {
            tracing::info!(%room_id, "room deleted");
        }
        self.waiting.retain(|w| w.room_id != *room_id);
    }

    /// Removes a specific player/room pair from the waiting queue.
    pub fn remove_from_queue(&mut self, room_id: &RoomId, player: PlayerId) {
        self.waiting
            .retain(|w| !(w.room_id == *room_id && w.player_id == player));
    }

    /// Number of active rooms.
    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    /// Number of players waiting for a random match.
    pub fn queue_len(&self) -> usize {
        self.waiting.len()
    }

    /// Generates an id no active room is using.
    ///
    /// Timestamp plus a 6-char random suffix; collisions are already
    /// vanishingly rare, the loop just makes uniqueness unconditional.
    fn fresh_room_id(&self) -> RoomId {
        loop {
            let millis = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .unwrap_or_default()
                .as_millis();
            let suffix: String = rand::rng()
                .sample_iter(&Alphanumeric)
                .take(6)
                .map(char::from)
                .collect();
            let id = RoomId(format!("room-{millis}-{suffix}"));
            if !self.rooms.contains_key(&id) {
                return id;
            }
        }
    }
}
