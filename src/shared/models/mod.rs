// Shared wire models
pub mod response;

pub use response::*;
