// Employee domain models
pub mod employee;

pub use employee::*;
