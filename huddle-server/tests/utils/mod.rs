pub mod failing_store;

pub use failing_store::*;
pub use mock_signaling::*;
pub use ws_client::*;
