pub mod state;
pub mod task_service;

pub use state::*;
pub use task_service::*;
