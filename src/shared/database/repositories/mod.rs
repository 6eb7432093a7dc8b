// Repositories: thin structs over the connection pool, one per entity.
// Query errors are returned raw (sqlx::Error) and classified into the API
// error taxonomy at the service boundary.
pub mod credential_token_repository;
pub mod department_repository;
pub mod message_repository;
pub mod refresh_token_repository;
pub mod task_repository;
pub mod user_repository;

pub use credential_token_repository::*;
pub use department_repository::*;
pub use message_repository::*;
pub use refresh_token_repository::*;
pub use task_repository::*;
pub use user_repository::*;
