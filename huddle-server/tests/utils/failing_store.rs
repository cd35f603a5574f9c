use async_trait::async_trait;
use huddle_core::{ChatMessage, Meeting, NewChatMessage, NewNote, Note, RoomCode};
use huddle_server::{MeetingStore, StoreError};

/// Store whose every call fails, for checking that nothing is delivered
/// when persistence does not happen.
pub struct FailingStore;

fn down<T>() -> Result<T, StoreError> {
    Err(StoreError::Unavailable("store is down".into()))
}

#[async_trait]
impl MeetingStore for FailingStore {
    async fn save_note(&self, _note: NewNote) -> Result<Note, StoreError> {
        down()
    }

    async fn notes_for_room(&self, _room_code: &RoomCode) -> Result<Vec<Note>, StoreError> {
        down()
    }

    async fn save_message(&self, _message: NewChatMessage) -> Result<ChatMessage, StoreError> {
        down()
    }

    async fn messages(&self) -> Result<Vec<ChatMessage>, StoreError> {
        down()
    }

    async fn save_meeting(&self, _meeting: Meeting) -> Result<Meeting, StoreError> {
        down()
    }

    async fn find_meeting(&self, _code: &RoomCode) -> Result<Option<Meeting>, StoreError> {
        down()
    }

    async fn list_meetings(&self) -> Result<Vec<Meeting>, StoreError> {
        down()
    }

    async fn ensure_meeting(&self, _meeting: Meeting) -> Result<bool, StoreError> {
        down()
    }
}
