// Message domain state
use crate::domains::message::services::MessageService;
use crate::shared::database::Database;

#[derive(Clone)]
pub struct MessageState {
    pub message_service: MessageService,
}

impl MessageState {
    pub fn new(db: Database) -> Self {
        Self {
            message_service: MessageService::new(db),
        }
    }
}
