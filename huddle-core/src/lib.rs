pub mod error;
pub mod model;

pub use error::ValidationError;
pub use model::*;
