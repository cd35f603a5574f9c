mod lobby_chat;
mod room_broadcaster;

pub use lobby_chat::*;
pub use room_broadcaster::*;
