pub mod message_service;
pub mod state;

pub use message_service::*;
pub use state::*;
