use async_trait::async_trait;
use huddle_core::{ConnectionId, ServerEvent};

/// Outbound side of the real-time channel.
///
/// The WebSocket layer implements this so presence, relay and broadcast
/// logic can address clients by connection id alone. Implementations must
/// only enqueue: no call may wait on the network.
#[async_trait]
pub trait SignalingOutput: Send + Sync {
    /// Queue `event` for one connection. Returns `false` if it is gone.
    async fn send_event(&self, connection_id: ConnectionId, event: ServerEvent) -> bool;

    /// Queue `event` for every live connection and return how many took it.
    async fn broadcast_all(&self, event: ServerEvent) -> usize;
}
