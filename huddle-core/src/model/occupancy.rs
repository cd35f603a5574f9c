use serde::{Deserialize, Serialize};

use crate::model::connection::ConnectionId;
use crate::model::meeting::RoomCode;
use crate::model::participant::ParticipantId;

/// Live association of one connection to a participant inside a room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Occupancy {
    pub connection_id: ConnectionId,
    pub participant_id: ParticipantId,
    pub room_code: RoomCode,
}

impl Occupancy {
    pub fn occupant(&self) -> Occupant {
        Occupant {
            participant_id: self.participant_id.clone(),
            connection_id: self.connection_id,
        }
    }
}

/// What other clients see of an occupancy.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Occupant {
    pub participant_id: ParticipantId,
    pub connection_id: ConnectionId,
}
