//! Integration tests for room lifecycle and random matchmaking.

use mnemo_engine::{GameConfig, PlayerId, RoomId, RoomStatus};
use mnemo_store::{RoomStore, StoreError};

fn pid(id: u64) -> PlayerId {
    PlayerId(id)
}

fn store() -> RoomStore {
    RoomStore::new(GameConfig::default())
}

// =========================================================================
// create / join
// =========================================================================

#[test]
fn test_create_room_starts_waiting_with_host() {
    let mut store = store();
    let room = store.create_room(pid(1), "Ada").clone();

    assert_eq!(room.status, RoomStatus::Waiting);
    assert_eq!(room.players.len(), 1);
    assert_eq!(room.players[0].id, pid(1));
    assert!(room.players[0].is_host);
    assert_eq!(room.players[0].score, 100);
    assert_eq!(room.deck.len(), 16);
    assert!(room.id.as_str().starts_with("room-"));
}

#[test]
fn test_create_room_ids_are_unique() {
    let mut store = store();
    let r1 = store.create_room(pid(1), "a").id.clone();
    let r2 = store.create_room(pid(2), "b").id.clone();
    assert_ne!(r1, r2);
    assert_eq!(store.room_count(), 2);
}

#[test]
fn test_join_room_starts_game_and_regenerates_deck() {
    let mut store = store();
    let room = store.create_room(pid(1), "Ada").clone();
    let pre_match_deck = room.deck.clone();

    let joined = store.join_room(&room.id, pid(2), "Grace").unwrap();

    assert_eq!(joined.status, RoomStatus::Playing);
    assert_eq!(joined.players.len(), 2);
    assert!(!joined.players[1].is_host);
    // Fresh shuffle on the second join: whatever the host saw while
    // waiting is gone.
    assert_ne!(joined.deck, pre_match_deck);
    assert!(joined.deck.iter().all(|c| !c.matched));
}

#[test]
fn test_join_unknown_room_is_not_found() {
    let mut store = store();
    let err = store
        .join_room(&RoomId::from("room-0-nope"), pid(1), "x")
        .unwrap_err();
    assert!(matches!(err, StoreError::NotFound(_)));
}

#[test]
fn test_join_full_room_is_rejected_without_touching_it() {
    let mut store = store();
    let room_id = store.create_room(pid(1), "a").id.clone();
    store.join_room(&room_id, pid(2), "b").unwrap();
    let before = store.get(&room_id).unwrap().clone();

    let err = store.join_room(&room_id, pid(3), "c").unwrap_err();

    assert!(matches!(err, StoreError::RoomFull(_)));
    // Deck not regenerated, players untouched.
    assert_eq!(store.get(&room_id).unwrap(), &before);
}

#[test]
fn test_join_finished_room_reports_already_started() {
    let mut store = store();
    let room_id = store.create_room(pid(1), "a").id.clone();
    store.room_mut(&room_id).unwrap().status = RoomStatus::Finished;

    let err = store.join_room(&room_id, pid(2), "b").unwrap_err();
    assert!(matches!(err, StoreError::AlreadyStarted(_)));
}

// =========================================================================
// random matchmaking
// =========================================================================

#[test]
fn test_join_random_with_empty_queue_enqueues() {
    let mut store = store();
    let result = store.join_random(pid(1), "Ada").unwrap();

    assert!(!result.matched);
    assert_eq!(result.room.status, RoomStatus::Waiting);
    assert_eq!(store.queue_len(), 1);
}

#[test]
fn test_join_random_pairs_with_oldest_waiter() {
    let mut store = store();
    let first = store.join_random(pid(1), "Ada").unwrap();
    let waiting_deck = first.room.deck.clone();

    let second = store.join_random(pid(2), "Grace").unwrap();

    assert!(second.matched);
    assert_eq!(second.room.id, first.room.id);
    assert_eq!(second.room.status, RoomStatus::Playing);
    assert_eq!(second.room.players.len(), 2);
    // Pairing runs through join_room, so the deck regenerates.
    assert_ne!(second.room.deck, waiting_deck);
    assert_eq!(store.queue_len(), 0);
}

#[test]
fn test_join_random_is_fifo() {
    let mut store = store();
    let a = store.join_random(pid(1), "a").unwrap();
    let _b = store.join_random(pid(2), "b").unwrap(); // pairs with a

    let c = store.join_random(pid(3), "c").unwrap();
    let d = store.join_random(pid(4), "d").unwrap();

    assert!(!c.matched);
    assert!(d.matched);
    assert_eq!(d.room.id, c.room.id);
    assert_ne!(d.room.id, a.room.id);
}

#[test]
fn test_stale_queue_entry_returns_to_front_and_reports() {
    let mut store = store();
    let waiting = store.join_random(pid(1), "Ada").unwrap();

    // The queued room races into an unjoinable state.
    store.room_mut(&waiting.room.id).unwrap().status = RoomStatus::Finished;

    let err = store.join_random(pid(2), "Grace").unwrap_err();
    assert!(matches!(err, StoreError::AlreadyStarted(_)));
    // Not silently dropped: the waiting player is back at the front.
    assert_eq!(store.queue_len(), 1);
}

// =========================================================================
// leave / delete
// =========================================================================

#[test]
fn test_leave_room_finishes_and_names_survivor() {
    let mut store = store();
    let room_id = store.create_room(pid(1), "a").id.clone();
    store.join_room(&room_id, pid(2), "b").unwrap();

    let room = store.leave_room(&room_id, pid(2)).unwrap();

    assert_eq!(room.status, RoomStatus::Finished);
    assert_eq!(room.winner_by_disconnect, Some(pid(1)));
    assert_eq!(room.winner, Some(pid(1)));
}

#[test]
fn test_leave_room_purges_waiting_queue_entry() {
    let mut store = store();
    let waiting = store.join_random(pid(1), "Ada").unwrap();

    store.leave_room(&waiting.room.id, pid(1));

    assert_eq!(store.queue_len(), 0);
    // Room itself survives until the deletion grace period fires.
    assert_eq!(store.room_count(), 1);
}

#[test]
fn test_leave_finished_room_keeps_original_outcome() {
    let mut store = store();
    let room_id = store.create_room(pid(1), "a").id.clone();
    store.join_room(&room_id, pid(2), "b").unwrap();

    store.leave_room(&room_id, pid(2));
    // Second disconnect must not flip the recorded winner.
    let room = store.leave_room(&room_id, pid(1)).unwrap();

    assert_eq!(room.winner_by_disconnect, Some(pid(1)));
    assert_eq!(room.winner, Some(pid(1)));
}

#[test]
fn test_leave_unknown_room_is_none() {
    let mut store = store();
    assert!(store.leave_room(&RoomId::from("room-0-gone"), pid(1)).is_none());
}

#[test]
fn test_delete_room_purges_room_and_queue() {
    let mut store = store();
    let waiting = store.join_random(pid(1), "Ada").unwrap();

    store.delete_room(&waiting.room.id);

    assert_eq!(store.room_count(), 0);
    assert_eq!(store.queue_len(), 0);
    assert!(store.get(&waiting.room.id).is_none());
}

#[test]
fn test_rooms_of_finds_memberships() {
    let mut store = store();
    let r1 = store.create_room(pid(1), "a").id.clone();
    let r2 = store.create_room(pid(2), "b").id.clone();
    store.join_room(&r2, pid(1), "a").unwrap();

    let mut rooms = store.rooms_of(pid(1));
    rooms.sort_by(|a, b| a.as_str().cmp(b.as_str()));
    let mut expected = vec![r1, r2];
    expected.sort_by(|a, b| a.as_str().cmp(b.as_str()));
    assert_eq!(rooms, expected);

    assert!(store.rooms_of(pid(99)).is_empty());
}
