// Task domain state
use crate::domains::task::services::TaskService;
use crate::shared::database::Database;

#[derive(Clone)]
pub struct TaskState {
    pub task_service: TaskService,
}

impl TaskState {
    pub fn new(db: Database) -> Self {
        Self {
            task_service: TaskService::new(db),
        }
    }
}
