use huddle_core::{ConnectionId, Occupant, ParticipantId, RoomCode};

use crate::registry::PeerRegistry;

/// Which occupant to leave out of a room listing.
#[derive(Debug, Clone, Copy)]
pub enum Exclude<'a> {
    Nobody,
    /// Every connection held by this participant.
    Participant(&'a ParticipantId),
    /// Just this one connection.
    Connection(&'a ConnectionId),
}

/// Read-only room view over a [`PeerRegistry`].
///
/// Scans the whole registry on every call. Fine for rooms of a few dozen
/// people; a per-room index kept in step with the registry is the next step
/// if that stops being true.
pub struct RoomIndex<'a> {
    registry: &'a PeerRegistry,
}

impl<'a> RoomIndex<'a> {
    pub fn new(registry: &'a PeerRegistry) -> Self {
        Self { registry }
    }

    /// Current occupants of `room_code` in registration order.
    pub fn occupants_of(&self, room_code: &RoomCode, excluding: Exclude<'_>) -> Vec<Occupant> {
        self.registry
            .iter()
            .filter(|o| &o.room_code == room_code)
            .filter(|o| match excluding {
                Exclude::Nobody => true,
                Exclude::Participant(p) => &o.participant_id != p,
                Exclude::Connection(c) => &o.connection_id != c,
            })
            .map(|o| o.occupant())
            .collect()
    }

    pub fn connections_in(&self, room_code: &RoomCode, excluding: Exclude<'_>) -> Vec<ConnectionId> {
        self.occupants_of(room_code, excluding)
            .into_iter()
            .map(|o| o.connection_id)
            .collect()
    }
}
