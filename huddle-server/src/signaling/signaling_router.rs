use crate::signaling::SignalingOutput;
use huddle_core::{ConnectionId, NegotiationKind, RelayedNegotiation};
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

/// Point-to-point relay for offers, answers and ICE candidates.
///
/// Holds no state and never looks inside the payload. Delivery is
/// best-effort: a target that has gone away just misses the message and
/// the sender is not told, since WebRTC clients retry negotiation anyway.
#[derive(Clone)]
pub struct SignalingRouter {
    output: Arc<dyn SignalingOutput>,
}

impl SignalingRouter {
    pub fn new(output: Arc<dyn SignalingOutput>) -> Self {
        Self { output }
    }

    /// Returns whether the event was queued for `to`.
    pub async fn relay(
        &self,
        kind: NegotiationKind,
        payload: Value,
        from: ConnectionId,
        to: ConnectionId,
    ) -> bool {
        let event = kind.into_event(RelayedNegotiation {
            payload,
            from_connection_id: from,
        });

        let delivered = self.output.send_event(to, event).await;
        if delivered {
            debug!("Relayed {} {} -> {}", kind.as_str(), from, to);
        } else {
            debug!("Dropped {} from {}: target {} is gone", kind.as_str(), from, to);
        }
        delivered
    }
}
