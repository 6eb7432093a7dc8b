// Message domain models
pub mod message;

pub use message::*;
