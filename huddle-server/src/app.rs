use axum::{
    Router,
    http::{HeaderValue, Method, StatusCode},
    routing::get,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::warn;

use crate::api;
use crate::broadcast::{LobbyChat, RoomBroadcaster};
use crate::presence::HubHandle;
use crate::signaling::{SignalingOutput, SignalingRouter, SignalingService, ws_handler};
use crate::store::MeetingStore;

/// Everything a connection or request handler needs, cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub signaling: SignalingService,
    pub hub: HubHandle,
    pub router: SignalingRouter,
    pub notes: RoomBroadcaster,
    pub lobby: LobbyChat,
    pub store: Arc<dyn MeetingStore>,
}

impl AppState {
    /// Wires the services together and spawns the presence hub.
    pub fn new(store: Arc<dyn MeetingStore>, hub_queue: usize) -> Self {
        let signaling = SignalingService::new();
        let output: Arc<dyn SignalingOutput> = Arc::new(signaling.clone());
        let hub = HubHandle::spawn(output.clone(), hub_queue);

        Self {
            router: SignalingRouter::new(output.clone()),
            notes: RoomBroadcaster::new(store.clone(), hub.clone()),
            lobby: LobbyChat::new(store.clone(), output),
            signaling,
            hub,
            store,
        }
    }
}

pub fn build_router(state: AppState, cors: CorsLayer) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/ws", get(ws_handler))
        .merge(api::router())
        .layer(cors)
        .with_state(state)
}

async fn healthz() -> (StatusCode, &'static str) {
    (StatusCode::OK, "ok")
}

/// `*` allows any origin; otherwise a comma-separated allow list.
pub fn cors_layer(origins: &str) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any);

    if origins.trim() == "*" {
        return layer.allow_origin(Any);
    }

    let allowed: Vec<HeaderValue> = origins
        .split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .filter_map(|o| match HeaderValue::from_str(o) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin {:?}", o);
                None
            }
        })
        .collect();
    layer.allow_origin(allowed)
}
