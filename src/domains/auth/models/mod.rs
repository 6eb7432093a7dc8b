// Auth domain models
pub mod auth;
pub mod credential_token;
pub mod jwt;
pub mod refresh_token;
pub mod user;

pub use auth::*;
pub use credential_token::*;
pub use jwt::*;
pub use refresh_token::*;
pub use user::*;
