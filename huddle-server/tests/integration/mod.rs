pub mod ws_tests;

use huddle_core::RoomCode;
use huddle_server::HubHandle;
use std::sync::Arc;
use tracing::Level;

use crate::utils::MockSignalingOutput;

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(Level::DEBUG)
        .with_test_writer()
        .try_init();
}

pub fn create_test_hub() -> (HubHandle, MockSignalingOutput) {
    let signaling = MockSignalingOutput::new();
    let hub = HubHandle::spawn(Arc::new(signaling.clone()), 100);
    (hub, signaling)
}

/// Waits until the hub has handled everything queued before this call.
pub async fn settle(hub: &HubHandle) {
    hub.occupants(RoomCode::from("__settle__"))
        .await
        .expect("Hub stopped");
}
