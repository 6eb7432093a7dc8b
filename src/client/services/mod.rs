// Endpoint groups as impl blocks on ApiClient
pub mod auth;
pub mod messages;
pub mod tasks;
pub mod users;
