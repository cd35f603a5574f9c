use huddle_core::{ParticipantId, RoomCode, ServerEvent};

use crate::integration::{create_test_hub, init_tracing, settle};

#[tokio::test]
async fn test_disconnect_without_join_is_silent() {
    init_tracing();

    let (hub, signaling) = create_test_hub();
    let a = signaling.connect().await;
    let lurker = signaling.connect().await;

    hub.join(a, ParticipantId::from("alice"), RoomCode::from("X"))
        .await
        .unwrap();
    settle(&hub).await;
    let before = signaling.total_sent().await;

    hub.disconnect(lurker).await.unwrap();
    settle(&hub).await;

    assert_eq!(signaling.total_sent().await, before);
    assert_eq!(hub.occupants(RoomCode::from("X")).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_double_disconnect_announces_once() {
    init_tracing();

    let (hub, signaling) = create_test_hub();
    let a = signaling.connect().await;
    let b = signaling.connect().await;
    let room = RoomCode::from("X");

    hub.join(a, ParticipantId::from("alice"), room.clone())
        .await
        .unwrap();
    hub.join(b, ParticipantId::from("bob"), room.clone())
        .await
        .unwrap();
    hub.disconnect(a).await.unwrap();
    hub.disconnect(a).await.unwrap();
    settle(&hub).await;

    let left = signaling
        .events_for(b)
        .await
        .into_iter()
        .filter(|e| matches!(e, ServerEvent::UserLeft(_)))
        .count();
    assert_eq!(left, 1);
}

#[tokio::test]
async fn test_last_occupant_leaving_empties_room() {
    init_tracing();

    let (hub, signaling) = create_test_hub();
    let a = signaling.connect().await;
    let room = RoomCode::from("X");

    hub.join(a, ParticipantId::from("alice"), room.clone())
        .await
        .unwrap();
    hub.disconnect(a).await.unwrap();

    assert!(hub.occupants(room).await.unwrap().is_empty());
    assert_eq!(signaling.names_for(a).await, vec!["existing-users"]);
}
