use huddle_core::{ConnectionId, Occupancy, ParticipantId, RoomCode};
use std::collections::HashMap;

/// Who is where, keyed by connection.
///
/// Plain data with no interior locking: the presence hub owns the only
/// instance and is the only code that mutates it.
#[derive(Debug, Default)]
pub struct PeerRegistry {
    entries: HashMap<ConnectionId, Slot>,
    next_seq: u64,
}

#[derive(Debug)]
struct Slot {
    seq: u64,
    occupancy: Occupancy,
}

impl PeerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Upserts the occupancy for `connection_id`.
    ///
    /// Re-registering keeps the connection's original position in iteration
    /// order; only a fresh connection is appended.
    pub fn register(
        &mut self,
        connection_id: ConnectionId,
        participant_id: ParticipantId,
        room_code: RoomCode,
    ) -> Option<Occupancy> {
        let occupancy = Occupancy {
            connection_id,
            participant_id,
            room_code,
        };

        if let Some(slot) = self.entries.get_mut(&connection_id) {
            return Some(std::mem::replace(&mut slot.occupancy, occupancy));
        }

        let seq = self.next_seq;
        self.next_seq += 1;
        self.entries.insert(connection_id, Slot { seq, occupancy });
        None
    }

    pub fn lookup(&self, connection_id: &ConnectionId) -> Option<&Occupancy> {
        self.entries.get(connection_id).map(|slot| &slot.occupancy)
    }

    /// Removes and returns the entry so the caller can tell the right room.
    pub fn remove(&mut self, connection_id: &ConnectionId) -> Option<Occupancy> {
        self.entries.remove(connection_id).map(|slot| slot.occupancy)
    }

    /// All occupancies in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Occupancy> {
        let mut slots: Vec<&Slot> = self.entries.values().collect();
        slots.sort_by_key(|slot| slot.seq);
        slots.into_iter().map(|slot| &slot.occupancy)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drops every entry and returns how many there were.
    pub fn clear(&mut self) -> usize {
        let count = self.entries.len();
        self.entries.clear();
        count
    }
}
