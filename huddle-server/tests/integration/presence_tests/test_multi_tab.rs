use huddle_core::{Occupant, ParticipantId, RoomCode, ServerEvent};

use crate::integration::{create_test_hub, init_tracing, settle};

/// Two tabs of one participant: the second tab is not told about the first,
/// but the first tab does hear that the second joined.
#[tokio::test]
async fn test_second_tab_of_same_participant() {
    init_tracing();

    let (hub, signaling) = create_test_hub();
    let tab1 = signaling.connect().await;
    let tab2 = signaling.connect().await;
    let room = RoomCode::from("X");

    hub.join(tab1, ParticipantId::from("alice"), room.clone())
        .await
        .unwrap();
    hub.join(tab2, ParticipantId::from("alice"), room.clone())
        .await
        .unwrap();
    settle(&hub).await;

    assert_eq!(
        signaling.events_for(tab2).await,
        vec![ServerEvent::ExistingUsers(vec![])]
    );
    assert_eq!(
        signaling.events_for(tab1).await,
        vec![
            ServerEvent::ExistingUsers(vec![]),
            ServerEvent::UserJoined(Occupant {
                participant_id: ParticipantId::from("alice"),
                connection_id: tab2,
            }),
        ]
    );
    assert_eq!(hub.occupants(room).await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_newcomer_sees_every_tab() {
    init_tracing();

    let (hub, signaling) = create_test_hub();
    let tab1 = signaling.connect().await;
    let tab2 = signaling.connect().await;
    let b = signaling.connect().await;
    let room = RoomCode::from("X");

    hub.join(tab1, ParticipantId::from("alice"), room.clone())
        .await
        .unwrap();
    hub.join(tab2, ParticipantId::from("alice"), room.clone())
        .await
        .unwrap();
    hub.join(b, ParticipantId::from("bob"), room.clone())
        .await
        .unwrap();
    settle(&hub).await;

    let ServerEvent::ExistingUsers(existing) = &signaling.events_for(b).await[0] else {
        panic!("expected existing-users first");
    };
    let connections: Vec<_> = existing.iter().map(|o| o.connection_id).collect();
    assert_eq!(connections, vec![tab1, tab2]);

    for tab in [tab1, tab2] {
        assert_eq!(
            signaling.names_for(tab).await.last(),
            Some(&"user-joined"),
            "every tab hears the newcomer"
        );
    }
}
