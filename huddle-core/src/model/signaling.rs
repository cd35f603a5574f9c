use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ValidationError, required};
use crate::model::connection::ConnectionId;
use crate::model::meeting::RoomCode;
use crate::model::note::{ChatMessage, NewChatMessage, NewNote, Note};
use crate::model::occupancy::Occupant;
use crate::model::participant::ParticipantId;

/// Events a client sends over the real-time channel.
///
/// Field names follow camelCase; the aliases keep older clients that still
/// speak `userId` / `meetingCode` / `toSocketId` working.
#[derive(Debug, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "kebab-case")]
pub enum ClientEvent {
    JoinMeeting(JoinMeeting),
    Offer(NegotiationRequest),
    Answer(NegotiationRequest),
    IceCandidate(NegotiationRequest),
    Note(NoteRequest),
    Message(MessageRequest),
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinMeeting {
    #[serde(default, alias = "userId")]
    pub participant_id: Option<String>,
    #[serde(default, alias = "meetingCode")]
    pub room_code: Option<String>,
}

impl JoinMeeting {
    pub fn validate(self) -> Result<(ParticipantId, RoomCode), ValidationError> {
        let participant_id = required(self.participant_id, "participantId")?;
        let room_code = required(self.room_code, "roomCode")?;
        Ok((ParticipantId(participant_id), RoomCode(room_code)))
    }
}

/// Offer, answer or candidate addressed to another connection.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NegotiationRequest {
    #[serde(default, alias = "sdp", alias = "candidate")]
    pub payload: Option<Value>,
    #[serde(default, alias = "toSocketId")]
    pub target_connection_id: Option<String>,
}

impl NegotiationRequest {
    pub fn validate(self) -> Result<(Value, ConnectionId), ValidationError> {
        let payload = match self.payload {
            Some(Value::Null) | None => return Err(ValidationError::MissingField("payload")),
            Some(payload) => payload,
        };
        let target = required(self.target_connection_id, "targetConnectionId")?;
        let target = target
            .parse::<ConnectionId>()
            .map_err(|e| ValidationError::Malformed {
                field: "targetConnectionId",
                reason: e.to_string(),
            })?;
        Ok((payload, target))
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteRequest {
    #[serde(default, alias = "userId")]
    pub participant_id: Option<String>,
    #[serde(default, alias = "meetingCode")]
    pub room_code: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

impl NoteRequest {
    pub fn validate(self) -> Result<NewNote, ValidationError> {
        Ok(NewNote {
            participant_id: ParticipantId(required(self.participant_id, "participantId")?),
            room_code: RoomCode(required(self.room_code, "roomCode")?),
            content: required(self.content, "content")?,
        })
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageRequest {
    #[serde(default, alias = "userId")]
    pub participant_id: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
}

impl MessageRequest {
    pub fn validate(self) -> Result<NewChatMessage, ValidationError> {
        Ok(NewChatMessage {
            participant_id: ParticipantId(required(self.participant_id, "participantId")?),
            text: required(self.text, "text")?,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NegotiationKind {
    Offer,
    Answer,
    IceCandidate,
}

impl NegotiationKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Offer => "offer",
            Self::Answer => "answer",
            Self::IceCandidate => "ice-candidate",
        }
    }

    /// Wraps a relayed payload into the outbound event of the same kind.
    pub fn into_event(self, relayed: RelayedNegotiation) -> ServerEvent {
        match self {
            Self::Offer => ServerEvent::Offer(relayed),
            Self::Answer => ServerEvent::Answer(relayed),
            Self::IceCandidate => ServerEvent::IceCandidate(relayed),
        }
    }
}

/// Events the server sends to a client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "kebab-case")]
pub enum ServerEvent {
    Connected(Connected),
    ExistingUsers(Vec<Occupant>),
    UserJoined(Occupant),
    UserLeft(Occupant),
    Offer(RelayedNegotiation),
    Answer(RelayedNegotiation),
    IceCandidate(RelayedNegotiation),
    Note(Note),
    Message(ChatMessage),
    Error(ErrorPayload),
}

impl ServerEvent {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Connected(_) => "connected",
            Self::ExistingUsers(_) => "existing-users",
            Self::UserJoined(_) => "user-joined",
            Self::UserLeft(_) => "user-left",
            Self::Offer(_) => "offer",
            Self::Answer(_) => "answer",
            Self::IceCandidate(_) => "ice-candidate",
            Self::Note(_) => "note",
            Self::Message(_) => "message",
            Self::Error(_) => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connected {
    pub connection_id: ConnectionId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelayedNegotiation {
    pub payload: Value,
    pub from_connection_id: ConnectionId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorPayload {
    pub code: String,
    pub message: String,
}
