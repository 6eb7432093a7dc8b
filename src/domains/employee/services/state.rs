// Employee domain state
use crate::domains::employee::services::EmployeeService;
use crate::shared::database::Database;

#[derive(Clone)]
pub struct EmployeeState {
    pub employee_service: EmployeeService,
}

impl EmployeeState {
    pub fn new(db: Database) -> Self {
        Self {
            employee_service: EmployeeService::new(db),
        }
    }
}
