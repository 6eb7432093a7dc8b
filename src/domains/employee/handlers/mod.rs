// Employee domain handlers
pub mod employee_handler;
