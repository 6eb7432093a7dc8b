// Employee domain services
pub mod employee_service;
pub mod state;

pub use employee_service::*;
pub use state::*;
