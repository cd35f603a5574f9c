use crate::signaling::SignalingOutput;
use async_trait::async_trait;
use axum::extract::ws::Message;
use dashmap::DashMap;
use huddle_core::{ConnectionId, ServerEvent};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, error};

struct SignalingInner {
    peers: DashMap<ConnectionId, mpsc::UnboundedSender<Message>>,
}

/// Table of live WebSocket writers, one unbounded queue per connection.
#[derive(Clone)]
pub struct SignalingService {
    inner: Arc<SignalingInner>,
}

impl Default for SignalingService {
    fn default() -> Self {
        Self::new()
    }
}

impl SignalingService {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(SignalingInner {
                peers: DashMap::new(),
            }),
        }
    }

    pub fn add_peer(&self, connection_id: ConnectionId, tx: mpsc::UnboundedSender<Message>) {
        self.inner.peers.insert(connection_id, tx);
    }

    pub fn remove_peer(&self, connection_id: &ConnectionId) {
        self.inner.peers.remove(connection_id);
    }

    pub fn connection_count(&self) -> usize {
        self.inner.peers.len()
    }

    fn encode(event: &ServerEvent) -> Option<Message> {
        match serde_json::to_string(event) {
            Ok(json) => Some(Message::Text(json.into())),
            Err(e) => {
                error!("Failed to serialize {} event: {}", event.name(), e);
                None
            }
        }
    }
}

#[async_trait]
impl SignalingOutput for SignalingService {
    async fn send_event(&self, connection_id: ConnectionId, event: ServerEvent) -> bool {
        let Some(peer) = self.inner.peers.get(&connection_id) else {
            debug!(
                "Dropping {} event for disconnected connection {}",
                event.name(),
                connection_id
            );
            return false;
        };
        let Some(msg) = Self::encode(&event) else {
            return false;
        };
        if let Err(e) = peer.send(msg) {
            error!("Failed to queue WS message to {}: {:?}", connection_id, e);
            return false;
        }
        true
    }

    async fn broadcast_all(&self, event: ServerEvent) -> usize {
        let Some(msg) = Self::encode(&event) else {
            return 0;
        };

        let mut delivered = 0;
        for peer in self.inner.peers.iter() {
            if peer.value().send(msg.clone()).is_ok() {
                delivered += 1;
            }
        }
        delivered
    }
}
