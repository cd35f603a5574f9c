use crate::error::ServerError;
use crate::signaling::SignalingOutput;
use crate::store::MeetingStore;
use huddle_core::{ChatMessage, NewChatMessage, ServerEvent};
use std::sync::Arc;
use tracing::{debug, error};

/// Process-wide chat: every live connection gets every message, whether or
/// not it joined a room.
#[derive(Clone)]
pub struct LobbyChat {
    store: Arc<dyn MeetingStore>,
    output: Arc<dyn SignalingOutput>,
}

impl LobbyChat {
    pub fn new(store: Arc<dyn MeetingStore>, output: Arc<dyn SignalingOutput>) -> Self {
        Self { store, output }
    }

    pub async fn post(&self, message: NewChatMessage) -> Result<ChatMessage, ServerError> {
        let message = self.store.save_message(message).await.map_err(|e| {
            error!("Failed to save chat message: {}", e);
            ServerError::from(e)
        })?;

        let delivered = self
            .output
            .broadcast_all(ServerEvent::Message(message.clone()))
            .await;
        debug!("Chat message {} delivered to {} connections", message.id, delivered);

        Ok(message)
    }

    pub async fn history(&self) -> Result<Vec<ChatMessage>, ServerError> {
        Ok(self.store.messages().await?)
    }
}
