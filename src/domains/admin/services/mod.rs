pub mod admin_service;
pub mod state;

pub use admin_service::*;
pub use state::*;
