use huddle_core::{Occupant, ParticipantId, RoomCode, ServerEvent};
use serde_json::json;
use std::sync::Arc;

use crate::integration::init_tracing;
use crate::utils::{FailingStore, WsClient, spawn_server, spawn_server_with};

fn join(participant: &str, room: &str) -> serde_json::Value {
    json!({
        "event": "join-meeting",
        "data": { "participantId": participant, "roomCode": room }
    })
}

#[tokio::test]
async fn test_meeting_session_over_websocket() {
    init_tracing();
    let (addr, state) = spawn_server().await;

    let mut alice = WsClient::connect(addr).await;
    let mut bob = WsClient::connect(addr).await;

    alice.send(join("alice", "X")).await;
    assert_eq!(alice.recv().await, ServerEvent::ExistingUsers(vec![]));

    bob.send(join("bob", "X")).await;
    assert_eq!(
        bob.recv().await,
        ServerEvent::ExistingUsers(vec![Occupant {
            participant_id: ParticipantId::from("alice"),
            connection_id: alice.connection_id,
        }])
    );
    assert!(matches!(
        alice.recv().await,
        ServerEvent::UserJoined(o) if o.connection_id == bob.connection_id
    ));

    bob.send(json!({
        "event": "offer",
        "data": {
            "payload": { "type": "offer", "sdp": "v=0" },
            "targetConnectionId": alice.connection_id.to_string(),
        }
    }))
    .await;
    let ServerEvent::Offer(offer) = alice.recv().await else {
        panic!("expected offer");
    };
    assert_eq!(offer.from_connection_id, bob.connection_id);
    assert_eq!(offer.payload["sdp"], "v=0");

    alice
        .send(json!({
            "event": "note",
            "data": { "participantId": "alice", "roomCode": "X", "content": "agenda" }
        }))
        .await;
    for client in [&mut alice, &mut bob] {
        let ServerEvent::Note(note) = client.recv().await else {
            panic!("expected note");
        };
        assert_eq!(note.content, "agenda");
    }

    let alice_id = alice.connection_id;
    alice.close().await;
    assert_eq!(
        bob.recv().await,
        ServerEvent::UserLeft(Occupant {
            participant_id: ParticipantId::from("alice"),
            connection_id: alice_id,
        })
    );
    assert_eq!(state.hub.occupants(RoomCode::from("X")).await.unwrap().len(), 1);

    bob.close().await;
}

#[tokio::test]
async fn test_legacy_field_names_still_join() {
    init_tracing();
    let (addr, state) = spawn_server().await;
    let mut client = WsClient::connect(addr).await;

    client
        .send(json!({
            "event": "join-meeting",
            "data": { "userId": "alice", "meetingCode": "X" }
        }))
        .await;
    assert_eq!(client.recv().await, ServerEvent::ExistingUsers(vec![]));

    let occupancy = state
        .hub
        .lookup(client.connection_id)
        .await
        .unwrap()
        .expect("joined");
    assert_eq!(occupancy.room_code, RoomCode::from("X"));
}

#[tokio::test]
async fn test_bad_events_get_error_and_change_nothing() {
    init_tracing();
    let (addr, state) = spawn_server().await;
    let mut client = WsClient::connect(addr).await;

    client
        .send(json!({ "event": "join-meeting", "data": { "participantId": "alice" } }))
        .await;
    let ServerEvent::Error(error) = client.recv().await else {
        panic!("expected error for missing roomCode");
    };
    assert_eq!(error.code, "VALIDATION_FAILED");
    assert!(state.hub.lookup(client.connection_id).await.unwrap().is_none());

    client.send_raw("not json").await;
    let ServerEvent::Error(error) = client.recv().await else {
        panic!("expected error for garbage");
    };
    assert_eq!(error.code, "VALIDATION_FAILED");

    client
        .send(json!({
            "event": "answer",
            "data": { "payload": { "sdp": "x" }, "targetConnectionId": "not-a-uuid" }
        }))
        .await;
    assert!(matches!(client.recv().await, ServerEvent::Error(_)));

    client.send(join("alice", "X")).await;
    assert_eq!(client.recv().await, ServerEvent::ExistingUsers(vec![]));
}

#[tokio::test]
async fn test_lobby_chat_reaches_everyone() {
    init_tracing();
    let (addr, _state) = spawn_server().await;
    let mut alice = WsClient::connect(addr).await;
    let mut idle = WsClient::connect(addr).await;

    alice
        .send(json!({
            "event": "message",
            "data": { "participantId": "alice", "text": "hello lobby" }
        }))
        .await;

    for client in [&mut alice, &mut idle] {
        let ServerEvent::Message(message) = client.recv().await else {
            panic!("expected chat message");
        };
        assert_eq!(message.text, "hello lobby");
    }
}

#[tokio::test]
async fn test_store_outage_reaches_only_the_sender() {
    init_tracing();
    let (addr, _state) = spawn_server_with(Arc::new(FailingStore)).await;
    let mut alice = WsClient::connect(addr).await;
    let mut bob = WsClient::connect(addr).await;

    alice.send(join("alice", "X")).await;
    assert_eq!(alice.recv().await, ServerEvent::ExistingUsers(vec![]));
    bob.send(join("bob", "X")).await;
    assert!(matches!(bob.recv().await, ServerEvent::ExistingUsers(_)));
    assert!(matches!(alice.recv().await, ServerEvent::UserJoined(_)));

    alice
        .send(json!({
            "event": "note",
            "data": { "participantId": "alice", "roomCode": "X", "content": "lost" }
        }))
        .await;
    let ServerEvent::Error(error) = alice.recv().await else {
        panic!("expected storage error for the note");
    };
    assert_eq!(error.code, "STORAGE_FAILED");

    alice
        .send(json!({
            "event": "message",
            "data": { "participantId": "alice", "text": "lost too" }
        }))
        .await;
    let ServerEvent::Error(error) = alice.recv().await else {
        panic!("expected storage error for the chat message");
    };
    assert_eq!(error.code, "STORAGE_FAILED");

    // Bob heard nothing: his next event is the reply to his own bad frame.
    bob.send_raw("not json").await;
    let ServerEvent::Error(error) = bob.recv().await else {
        panic!("expected only the validation error");
    };
    assert_eq!(error.code, "VALIDATION_FAILED");
}
