// Employee domain routes
use axum::{
    routing::{get, put},
    Router,
};

use crate::domains::employee::handlers::employee_handler;
use crate::shared::services::AppState;

/// 직원 라우터 생성
/// "/profile" and "/:id" coexist: axum matches static segments first.
pub fn create_employee_router() -> Router<AppState> {
    Router::new()
        .route("/profile", put(employee_handler::update_profile))
        .route(
            "/:id",
            get(employee_handler::get_employee).put(employee_handler::update_employee),
        )
        .route(
            "/department/:id",
            get(employee_handler::department_members),
        )
}
