// Shared utilities
pub mod pagination;

pub use pagination::*;
