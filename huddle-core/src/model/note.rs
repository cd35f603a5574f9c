use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::meeting::RoomCode;
use crate::model::participant::ParticipantId;

/// Persisted room-scoped note. Immutable once stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: Uuid,
    pub participant_id: ParticipantId,
    pub room_code: RoomCode,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// A validated note that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewNote {
    pub participant_id: ParticipantId,
    pub room_code: RoomCode,
    pub content: String,
}

impl NewNote {
    pub fn stamp(self, id: Uuid, created_at: DateTime<Utc>) -> Note {
        Note {
            id,
            participant_id: self.participant_id,
            room_code: self.room_code,
            content: self.content,
            created_at,
        }
    }
}

/// Persisted lobby chat line, delivered to every live connection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub id: Uuid,
    pub participant_id: ParticipantId,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewChatMessage {
    pub participant_id: ParticipantId,
    pub text: String,
}

impl NewChatMessage {
    pub fn stamp(self, id: Uuid, created_at: DateTime<Utc>) -> ChatMessage {
        ChatMessage {
            id,
            participant_id: self.participant_id,
            text: self.text,
            created_at,
        }
    }
}
