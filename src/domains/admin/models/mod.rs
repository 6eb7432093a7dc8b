// Admin domain models
pub mod admin;
pub mod department;
pub mod stats;

pub use admin::*;
pub use department::*;
pub use stats::*;
