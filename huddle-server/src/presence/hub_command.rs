use huddle_core::{ConnectionId, Occupancy, Occupant, ParticipantId, RoomCode, ServerEvent};
use tokio::sync::oneshot;

/// Work items for the presence hub, processed strictly in arrival order.
#[derive(Debug)]
pub enum HubCommand {
    /// A connection announced who it is and which room it is in.
    Join {
        connection_id: ConnectionId,
        participant_id: ParticipantId,
        room_code: RoomCode,
    },

    /// The transport closed. Safe to send more than once.
    Disconnect { connection_id: ConnectionId },

    /// Deliver an already persisted event to everyone in a room.
    Broadcast {
        room_code: RoomCode,
        event: ServerEvent,
        reply: oneshot::Sender<usize>,
    },

    Occupants {
        room_code: RoomCode,
        reply: oneshot::Sender<Vec<Occupant>>,
    },

    Lookup {
        connection_id: ConnectionId,
        reply: oneshot::Sender<Option<Occupancy>>,
    },
}
