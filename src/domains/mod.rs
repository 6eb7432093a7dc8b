pub mod admin;
pub mod auth;
pub mod employee;
pub mod message;
pub mod task;
