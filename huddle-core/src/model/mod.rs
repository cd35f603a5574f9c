mod connection;
mod meeting;
mod note;
mod occupancy;
mod participant;
mod signaling;

pub use connection::ConnectionId;
pub use meeting::{CONSTANT_ROOM_CODE, Meeting, NewMeeting, RoomCode};
pub use note::{ChatMessage, NewChatMessage, NewNote, Note};
pub use occupancy::{Occupancy, Occupant};
pub use participant::ParticipantId;
pub use signaling::{
    ClientEvent, Connected, ErrorPayload, JoinMeeting, MessageRequest, NegotiationKind,
    NegotiationRequest, NoteRequest, RelayedNegotiation, ServerEvent,
};
