pub mod api;
pub mod app;
pub mod broadcast;
pub mod config;
pub mod error;
pub mod presence;
pub mod registry;
pub mod seed;
pub mod signaling;
pub mod store;

pub use app::{AppState, build_router, cors_layer};
pub use broadcast::{LobbyChat, RoomBroadcaster};
pub use config::{Cli, ServerConfig};
pub use error::{ErrorCode, ServerError};
pub use presence::{Hub, HubCommand, HubHandle, PresenceCoordinator};
pub use registry::{Exclude, PeerRegistry, RoomIndex};
pub use signaling::{SignalingOutput, SignalingRouter, SignalingService, ws_handler};
pub use store::{MeetingStore, MemoryStore, SqliteStore, StoreError};
