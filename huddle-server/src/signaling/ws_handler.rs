use crate::app::AppState;
use crate::error::ServerError;
use crate::signaling::SignalingOutput;
use axum::extract::State;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::response::IntoResponse;
use futures::{SinkExt, Stream, StreamExt};
use huddle_core::{
    ClientEvent, Connected, ConnectionId, NegotiationKind, NegotiationRequest, ServerEvent,
    ValidationError,
};
use tokio::sync::{mpsc, watch};
use tracing::{error, info, warn};

pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

async fn handle_socket(socket: WebSocket, state: AppState) {
    let connection_id = ConnectionId::new();
    info!("New WebSocket connection: {}", connection_id);

    let (mut sender, receiver) = socket.split();
    let (tx, mut rx) = mpsc::unbounded_channel();

    state.signaling.add_peer(connection_id, tx);
    state
        .signaling
        .send_event(connection_id, ServerEvent::Connected(Connected { connection_id }))
        .await;

    let mut send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(msg).await.is_err() {
                break;
            }
        }
    });

    let (closing_tx, closing_rx) = watch::channel(false);
    let mut recv_task = tokio::spawn(receive_events(
        receiver,
        state.clone(),
        connection_id,
        closing_rx,
    ));

    // The reader is never aborted mid-event: a note it has stored must still
    // go out to the room.
    tokio::select! {
        _ = (&mut send_task) => {
            let _ = closing_tx.send(true);
            let _ = (&mut recv_task).await;
        }
        _ = (&mut recv_task) => send_task.abort(),
    };

    if let Err(e) = state.hub.disconnect(connection_id).await {
        error!("Failed to report disconnect of {}: {}", connection_id, e);
    }
    state.signaling.remove_peer(&connection_id);
    info!("WebSocket disconnected: {}", connection_id);
}

/// Reads and dispatches events until the client goes away, the hub stops, or
/// `closing` flips. `closing` is only checked between events.
async fn receive_events<S>(
    mut receiver: S,
    state: AppState,
    connection_id: ConnectionId,
    mut closing: watch::Receiver<bool>,
) where
    S: Stream<Item = Result<Message, axum::Error>> + Unpin,
{
    loop {
        let msg = tokio::select! {
            msg = receiver.next() => msg,
            _ = closing.changed() => break,
        };
        let Some(Ok(msg)) = msg else {
            break;
        };

        match msg {
            Message::Text(text) => {
                let result = match serde_json::from_str::<ClientEvent>(&text) {
                    Ok(event) => dispatch(&state, connection_id, event).await,
                    Err(e) => Err(ValidationError::Malformed {
                        field: "event",
                        reason: e.to_string(),
                    }
                    .into()),
                };

                match result {
                    Ok(()) => {}
                    Err(ServerError::HubUnavailable) => {
                        error!("Presence hub died, closing {}", connection_id);
                        break;
                    }
                    Err(e) => {
                        warn!("Rejected event from {}: {}", connection_id, e);
                        state.signaling.send_event(connection_id, e.to_event()).await;
                    }
                }
            }
            Message::Close(_) => break,
            _ => {}
        }
    }
}

/// Handles one inbound event for `from`. Nothing is mutated unless the event
/// validates.
async fn dispatch(
    state: &AppState,
    from: ConnectionId,
    event: ClientEvent,
) -> Result<(), ServerError> {
    match event {
        ClientEvent::JoinMeeting(join) => {
            let (participant_id, room_code) = join.validate()?;
            state.hub.join(from, participant_id, room_code).await
        }
        ClientEvent::Offer(request) => relay(state, NegotiationKind::Offer, from, request).await,
        ClientEvent::Answer(request) => relay(state, NegotiationKind::Answer, from, request).await,
        ClientEvent::IceCandidate(request) => {
            relay(state, NegotiationKind::IceCandidate, from, request).await
        }
        ClientEvent::Note(request) => {
            state.notes.publish(request.validate()?).await?;
            Ok(())
        }
        ClientEvent::Message(request) => {
            state.lobby.post(request.validate()?).await?;
            Ok(())
        }
    }
}

async fn relay(
    state: &AppState,
    kind: NegotiationKind,
    from: ConnectionId,
    request: NegotiationRequest,
) -> Result<(), ServerError> {
    let (payload, to) = request.validate()?;
    state.router.relay(kind, payload, from, to).await;
    Ok(())
}
