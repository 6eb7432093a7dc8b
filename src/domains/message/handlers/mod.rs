pub mod message_handler;
