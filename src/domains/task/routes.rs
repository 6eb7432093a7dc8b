// Task domain routes
use axum::{
    routing::{get, patch, post},
    Router,
};

use crate::domains::task::handlers::task_handler;
use crate::shared::services::AppState;

/// 업무 라우터 생성
pub fn create_task_router() -> Router<AppState> {
    Router::new()
        .route("/", get(task_handler::list_tasks).post(task_handler::create_task))
        .route("/me", get(task_handler::my_tasks))
        .route(
            "/:id",
            get(task_handler::get_task)
                .put(task_handler::update_task)
                .delete(task_handler::delete_task),
        )
        .route("/:id/assign", post(task_handler::assign_task))
        .route("/:id/status", patch(task_handler::update_task_status))
}
