//! Durable storage for meetings, notes and lobby chat.
//!
//! The presence core never touches storage directly; it only sees the
//! [`MeetingStore`] seam, which assigns ids and timestamps on save.

mod memory;
mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use async_trait::async_trait;
use huddle_core::{ChatMessage, Meeting, NewChatMessage, NewNote, Note, RoomCode};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Backend(sqlx::Error),

    #[error("{0} already exists")]
    Conflict(String),

    #[error("stored row is unreadable: {0}")]
    Corrupt(String),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed => {
                Self::Unavailable(err.to_string())
            }
            other => Self::Backend(other),
        }
    }
}

#[async_trait]
pub trait MeetingStore: Send + Sync {
    /// Appends a note, assigning its id and creation time.
    async fn save_note(&self, note: NewNote) -> Result<Note, StoreError>;

    /// Notes for one room, oldest first.
    async fn notes_for_room(&self, room_code: &RoomCode) -> Result<Vec<Note>, StoreError>;

    async fn save_message(&self, message: NewChatMessage) -> Result<ChatMessage, StoreError>;

    /// Lobby chat history, oldest first.
    async fn messages(&self) -> Result<Vec<ChatMessage>, StoreError>;

    /// Fails with [`StoreError::Conflict`] if the code is taken.
    async fn save_meeting(&self, meeting: Meeting) -> Result<Meeting, StoreError>;

    async fn find_meeting(&self, code: &RoomCode) -> Result<Option<Meeting>, StoreError>;

    async fn list_meetings(&self) -> Result<Vec<Meeting>, StoreError>;

    /// Inserts `meeting` unless its code exists. Returns whether it inserted.
    async fn ensure_meeting(&self, meeting: Meeting) -> Result<bool, StoreError>;
}
