// Admin domain routes
use axum::{
    routing::{delete, get, put},
    Router,
};

use crate::domains::admin::handlers::admin_handler;
use crate::shared::services::AppState;

/// 관리자 라우터 생성
pub fn create_admin_router() -> Router<AppState> {
    Router::new()
        .route(
            "/users",
            get(admin_handler::list_users).post(admin_handler::create_user),
        )
        .route(
            "/users/:id",
            put(admin_handler::update_user).delete(admin_handler::delete_user),
        )
        .route(
            "/departments",
            get(admin_handler::list_departments).post(admin_handler::create_department),
        )
        .route("/departments/:id", delete(admin_handler::delete_department))
        .route("/stats", get(admin_handler::system_stats))
}
