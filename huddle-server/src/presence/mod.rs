mod hub;
mod hub_command;
mod presence_coordinator;

pub use hub::*;
pub use hub_command::*;
pub use presence_coordinator::*;
