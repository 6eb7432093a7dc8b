// Auth domain state
// 인증 도메인 상태
use crate::domains::auth::services::{AuthService, TokenService};
use crate::shared::database::Database;

/// Auth domain state
/// 인증 도메인에서 필요한 서비스들을 포함하는 상태
#[derive(Clone)]
pub struct AuthState {
    pub auth_service: AuthService,
    pub token_service: TokenService,
}

impl AuthState {
    pub fn new(db: Database, token_service: TokenService) -> Self {
        Self {
            auth_service: AuthService::new(db, token_service.clone()),
            token_service,
        }
    }
}
