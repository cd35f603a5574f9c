use async_trait::async_trait;
use chrono::Utc;
use huddle_core::{ChatMessage, Meeting, NewChatMessage, NewNote, Note, RoomCode};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::store::{MeetingStore, StoreError};

#[derive(Default)]
struct Tables {
    meetings: Vec<Meeting>,
    notes: Vec<Note>,
    messages: Vec<ChatMessage>,
}

/// Process-local store. Used when no database is configured and in tests.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MeetingStore for MemoryStore {
    async fn save_note(&self, note: NewNote) -> Result<Note, StoreError> {
        let note = note.stamp(Uuid::new_v4(), Utc::now());
        self.tables.write().await.notes.push(note.clone());
        Ok(note)
    }

    async fn notes_for_room(&self, room_code: &RoomCode) -> Result<Vec<Note>, StoreError> {
        let mut notes: Vec<Note> = self
            .tables
            .read()
            .await
            .notes
            .iter()
            .filter(|n| &n.room_code == room_code)
            .cloned()
            .collect();
        notes.sort_by_key(|n| n.created_at);
        Ok(notes)
    }

    async fn save_message(&self, message: NewChatMessage) -> Result<ChatMessage, StoreError> {
        let message = message.stamp(Uuid::new_v4(), Utc::now());
        self.tables.write().await.messages.push(message.clone());
        Ok(message)
    }

    async fn messages(&self) -> Result<Vec<ChatMessage>, StoreError> {
        let mut messages = self.tables.read().await.messages.clone();
        messages.sort_by_key(|m| m.created_at);
        Ok(messages)
    }

    async fn save_meeting(&self, meeting: Meeting) -> Result<Meeting, StoreError> {
        let mut tables = self.tables.write().await;
        if tables.meetings.iter().any(|m| m.code == meeting.code) {
            return Err(StoreError::Conflict(format!("meeting {}", meeting.code)));
        }
        tables.meetings.push(meeting.clone());
        Ok(meeting)
    }

    async fn find_meeting(&self, code: &RoomCode) -> Result<Option<Meeting>, StoreError> {
        Ok(self
            .tables
            .read()
            .await
            .meetings
            .iter()
            .find(|m| &m.code == code)
            .cloned())
    }

    async fn list_meetings(&self) -> Result<Vec<Meeting>, StoreError> {
        Ok(self.tables.read().await.meetings.clone())
    }

    async fn ensure_meeting(&self, meeting: Meeting) -> Result<bool, StoreError> {
        let mut tables = self.tables.write().await;
        if tables.meetings.iter().any(|m| m.code == meeting.code) {
            return Ok(false);
        }
        tables.meetings.push(meeting);
        Ok(true)
    }
}
