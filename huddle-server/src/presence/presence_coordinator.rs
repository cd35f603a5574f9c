use crate::registry::{Exclude, PeerRegistry, RoomIndex};
use crate::signaling::SignalingOutput;
use huddle_core::{ConnectionId, Occupancy, Occupant, ParticipantId, RoomCode, ServerEvent};
use std::sync::Arc;
use tracing::{debug, info};

/// Join/leave protocol over the peer registry.
///
/// Each connection goes `Unjoined -> Joined -> Disconnected`. Joining again
/// just re-registers; the room it came from is not told.
pub struct PresenceCoordinator {
    registry: PeerRegistry,
    output: Arc<dyn SignalingOutput>,
}

impl PresenceCoordinator {
    pub fn new(output: Arc<dyn SignalingOutput>) -> Self {
        Self {
            registry: PeerRegistry::new(),
            output,
        }
    }

    /// Registers the connection, announces it to the rest of the room and
    /// replies to it with who was already there.
    ///
    /// `existing-users` leaves out every connection of the joining
    /// participant, while `user-joined` goes to every other connection in
    /// the room, the participant's own other tabs included.
    pub async fn join(
        &mut self,
        connection_id: ConnectionId,
        participant_id: ParticipantId,
        room_code: RoomCode,
    ) {
        if let Some(previous) =
            self.registry
                .register(connection_id, participant_id.clone(), room_code.clone())
        {
            if previous.room_code != room_code {
                debug!(
                    "Connection {} moved from {} to {} without leaving",
                    connection_id, previous.room_code, room_code
                );
            }
        }

        let index = RoomIndex::new(&self.registry);
        let existing = index.occupants_of(&room_code, Exclude::Participant(&participant_id));
        let audience = index.connections_in(&room_code, Exclude::Connection(&connection_id));

        info!(
            "{} joined {} on {} ({} already present)",
            participant_id,
            room_code,
            connection_id,
            audience.len()
        );

        let joined = Occupant {
            participant_id,
            connection_id,
        };
        for peer in audience {
            self.output
                .send_event(peer, ServerEvent::UserJoined(joined.clone()))
                .await;
        }

        self.output
            .send_event(connection_id, ServerEvent::ExistingUsers(existing))
            .await;
    }

    /// Deregisters the connection and tells the room it left.
    ///
    /// Returns `None`, and notifies nobody, if it never joined or was
    /// already removed.
    pub async fn disconnect(&mut self, connection_id: &ConnectionId) -> Option<Occupancy> {
        let occupancy = self.registry.remove(connection_id)?;

        let audience =
            RoomIndex::new(&self.registry).connections_in(&occupancy.room_code, Exclude::Nobody);
        info!(
            "{} left {} from {} ({} remaining)",
            occupancy.participant_id,
            occupancy.room_code,
            connection_id,
            audience.len()
        );

        let left = occupancy.occupant();
        for peer in audience {
            self.output
                .send_event(peer, ServerEvent::UserLeft(left.clone()))
                .await;
        }

        Some(occupancy)
    }

    /// Sends `event` to every connection currently in the room, and returns
    /// how many were reached.
    pub async fn broadcast(&self, room_code: &RoomCode, event: ServerEvent) -> usize {
        let audience = RoomIndex::new(&self.registry).connections_in(room_code, Exclude::Nobody);

        let mut delivered = 0;
        for peer in audience {
            if self.output.send_event(peer, event.clone()).await {
                delivered += 1;
            }
        }
        debug!("Delivered {} to {} in {}", event.name(), delivered, room_code);
        delivered
    }

    pub fn occupants(&self, room_code: &RoomCode) -> Vec<Occupant> {
        RoomIndex::new(&self.registry).occupants_of(room_code, Exclude::Nobody)
    }

    pub fn lookup(&self, connection_id: &ConnectionId) -> Option<Occupancy> {
        self.registry.lookup(connection_id).cloned()
    }

    /// Forgets every occupancy without notifying anyone.
    pub fn clear(&mut self) -> usize {
        self.registry.clear()
    }
}
