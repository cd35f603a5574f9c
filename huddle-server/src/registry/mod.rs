mod peer_registry;
mod room_index;

pub use peer_registry::*;
pub use room_index::*;
