use crate::domains::admin::services::state::AdminState;
use crate::domains::auth::services::state::AuthState;
use crate::domains::auth::services::TokenService;
use crate::domains::employee::services::state::EmployeeState;
use crate::domains::message::services::state::MessageState;
use crate::domains::task::services::state::TaskState;
use crate::shared::config::AppConfig;
use crate::shared::database::Database;

/// Application state (combines all domain states)
/// 애플리케이션 상태 (모든 도메인 상태를 조합)
#[derive(Clone)]
pub struct AppState {
    /// 데이터베이스 연결 (공유)
    pub db: Database,
    pub config: AppConfig,
    pub auth_state: AuthState,
    pub employee_state: EmployeeState,
    pub task_state: TaskState,
    pub message_state: MessageState,
    pub admin_state: AdminState,
}

impl AppState {
    /// 모든 도메인 State를 초기화하고 조합
    pub fn new(db: Database, config: AppConfig) -> Self {
        let token_service = TokenService::new(&config.jwt);

        let auth_state = AuthState::new(db.clone(), token_service);
        let employee_state = EmployeeState::new(db.clone());
        let task_state = TaskState::new(db.clone());
        let message_state = MessageState::new(db.clone());
        let admin_state = AdminState::new(db.clone());

        Self {
            db,
            config,
            auth_state,
            employee_state,
            task_state,
            message_state,
            admin_state,
        }
    }
}
