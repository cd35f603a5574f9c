use crate::error::ServerError;
use crate::presence::HubHandle;
use crate::store::MeetingStore;
use huddle_core::{NewNote, Note, RoomCode, ServerEvent};
use std::sync::Arc;
use tracing::{debug, error};

/// Persists room notes and fans them out to the room.
///
/// The store write happens before any delivery: if it fails, nobody sees
/// the note. A publisher that sits in the room gets its own note back.
#[derive(Clone)]
pub struct RoomBroadcaster {
    store: Arc<dyn MeetingStore>,
    hub: HubHandle,
}

impl RoomBroadcaster {
    pub fn new(store: Arc<dyn MeetingStore>, hub: HubHandle) -> Self {
        Self { store, hub }
    }

    pub async fn publish(&self, note: NewNote) -> Result<Note, ServerError> {
        let room_code = note.room_code.clone();
        let note = self.store.save_note(note).await.map_err(|e| {
            error!("Failed to save note for {}: {}", room_code, e);
            ServerError::from(e)
        })?;

        let delivered = self
            .hub
            .broadcast(room_code, ServerEvent::Note(note.clone()))
            .await?;
        debug!("Note {} delivered to {} connections", note.id, delivered);

        Ok(note)
    }

    /// Backfill for late joiners, oldest first.
    pub async fn history(&self, room_code: &RoomCode) -> Result<Vec<Note>, ServerError> {
        Ok(self.store.notes_for_room(room_code).await?)
    }
}
