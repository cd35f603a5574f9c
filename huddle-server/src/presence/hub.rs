use crate::error::ServerError;
use crate::presence::{HubCommand, PresenceCoordinator};
use crate::signaling::SignalingOutput;
use huddle_core::{ConnectionId, Occupancy, Occupant, ParticipantId, RoomCode, ServerEvent};
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use tracing::info;

/// Single task that owns the peer registry.
///
/// Every connection feeds its presence commands into one queue, so the
/// commands of any one connection are handled in the order it sent them and
/// no two handlers ever touch the registry at once.
pub struct Hub {
    coordinator: PresenceCoordinator,
    command_rx: mpsc::Receiver<HubCommand>,
}

impl Hub {
    pub fn new(output: Arc<dyn SignalingOutput>, command_rx: mpsc::Receiver<HubCommand>) -> Self {
        Self {
            coordinator: PresenceCoordinator::new(output),
            command_rx,
        }
    }

    /// Runs until every [`HubHandle`] is dropped, then clears the registry.
    pub async fn run(mut self) {
        info!("Presence hub started");

        while let Some(cmd) = self.command_rx.recv().await {
            self.handle_command(cmd).await;
        }

        let dropped = self.coordinator.clear();
        info!("Presence hub stopped, dropped {} occupancies", dropped);
    }

    async fn handle_command(&mut self, cmd: HubCommand) {
        match cmd {
            HubCommand::Join {
                connection_id,
                participant_id,
                room_code,
            } => {
                self.coordinator
                    .join(connection_id, participant_id, room_code)
                    .await;
            }

            HubCommand::Disconnect { connection_id } => {
                self.coordinator.disconnect(&connection_id).await;
            }

            HubCommand::Broadcast {
                room_code,
                event,
                reply,
            } => {
                let delivered = self.coordinator.broadcast(&room_code, event).await;
                let _ = reply.send(delivered);
            }

            HubCommand::Occupants { room_code, reply } => {
                let _ = reply.send(self.coordinator.occupants(&room_code));
            }

            HubCommand::Lookup {
                connection_id,
                reply,
            } => {
                let _ = reply.send(self.coordinator.lookup(&connection_id));
            }
        }
    }
}

/// Cloneable sender side of the hub queue.
#[derive(Clone)]
pub struct HubHandle {
    command_tx: mpsc::Sender<HubCommand>,
}

impl HubHandle {
    /// Spawns a hub on the current runtime and returns a handle to it.
    pub fn spawn(output: Arc<dyn SignalingOutput>, capacity: usize) -> Self {
        let (command_tx, command_rx) = mpsc::channel(capacity.max(1));
        tokio::spawn(Hub::new(output, command_rx).run());
        Self { command_tx }
    }

    pub fn from_sender(command_tx: mpsc::Sender<HubCommand>) -> Self {
        Self { command_tx }
    }

    async fn send(&self, cmd: HubCommand) -> Result<(), ServerError> {
        self.command_tx
            .send(cmd)
            .await
            .map_err(|_| ServerError::HubUnavailable)
    }

    async fn ask<T>(
        &self,
        build: impl FnOnce(oneshot::Sender<T>) -> HubCommand,
    ) -> Result<T, ServerError> {
        let (reply, rx) = oneshot::channel();
        self.send(build(reply)).await?;
        rx.await.map_err(|_| ServerError::HubUnavailable)
    }

    pub async fn join(
        &self,
        connection_id: ConnectionId,
        participant_id: ParticipantId,
        room_code: RoomCode,
    ) -> Result<(), ServerError> {
        self.send(HubCommand::Join {
            connection_id,
            participant_id,
            room_code,
        })
        .await
    }

    pub async fn disconnect(&self, connection_id: ConnectionId) -> Result<(), ServerError> {
        self.send(HubCommand::Disconnect { connection_id }).await
    }

    /// Resolves once the event is queued for every occupant of the room.
    pub async fn broadcast(
        &self,
        room_code: RoomCode,
        event: ServerEvent,
    ) -> Result<usize, ServerError> {
        self.ask(|reply| HubCommand::Broadcast {
            room_code,
            event,
            reply,
        })
        .await
    }

    pub async fn occupants(&self, room_code: RoomCode) -> Result<Vec<Occupant>, ServerError> {
        self.ask(|reply| HubCommand::Occupants { room_code, reply })
            .await
    }

    pub async fn lookup(
        &self,
        connection_id: ConnectionId,
    ) -> Result<Option<Occupancy>, ServerError> {
        self.ask(|reply| HubCommand::Lookup {
            connection_id,
            reply,
        })
        .await
    }
}
