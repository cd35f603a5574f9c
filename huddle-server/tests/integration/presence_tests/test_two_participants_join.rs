use huddle_core::{Occupant, ParticipantId, RoomCode, ServerEvent};

use crate::integration::{create_test_hub, init_tracing, settle};

#[tokio::test]
async fn test_two_participants_join_and_one_leaves() {
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
    settle(&hub).await;

    let alice = Occupant {
        participant_id: ParticipantId::from("alice"),
        connection_id: a,
    };
    let bob = Occupant {
        participant_id: ParticipantId::from("bob"),
        connection_id: b,
    };

    assert_eq!(
        signaling.events_for(a).await,
        vec![
            ServerEvent::ExistingUsers(vec![]),
            ServerEvent::UserJoined(bob.clone()),
        ]
    );
    assert_eq!(
        signaling.events_for(b).await,
        vec![ServerEvent::ExistingUsers(vec![alice.clone()])]
    );
    assert_eq!(
        hub.occupants(room.clone()).await.unwrap(),
        vec![alice.clone(), bob.clone()]
    );

    hub.disconnect(a).await.unwrap();
    settle(&hub).await;

    assert_eq!(
        signaling.events_for(b).await.last(),
        Some(&ServerEvent::UserLeft(alice))
    );
    assert_eq!(hub.occupants(room).await.unwrap(), vec![bob]);
    assert!(hub.lookup(a).await.unwrap().is_none());
}

#[tokio::test]
async fn test_rooms_do_not_hear_each_other() {
    init_tracing();

    let (hub, signaling) = create_test_hub();
    let a = signaling.connect().await;
    let b = signaling.connect().await;

    hub.join(a, ParticipantId::from("alice"), RoomCode::from("X"))
        .await
        .unwrap();
    hub.join(b, ParticipantId::from("bob"), RoomCode::from("Y"))
        .await
        .unwrap();
    hub.disconnect(b).await.unwrap();
    settle(&hub).await;

    assert_eq!(signaling.names_for(a).await, vec!["existing-users"]);
    assert_eq!(signaling.names_for(b).await, vec!["existing-users"]);
}
