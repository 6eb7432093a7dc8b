// Routes module: combines all domain routers
// 모든 도메인의 라우터를 조합

use axum::{extract::State, routing::get, Json, Router};
use serde_json::json;

use crate::shared::config::API_PREFIX;
use crate::shared::services::AppState;

use crate::domains::admin::routes::create_admin_router;
use crate::domains::auth::routes::create_auth_router;
use crate::domains::employee::routes::create_employee_router;
use crate::domains::message::routes::create_message_router;
use crate::domains::task::routes::create_task_router;

/// Create main router (combines all domain routers)
/// 메인 라우터 생성
pub fn create_router() -> Router<AppState> {
    Router::new()
        .nest(&format!("{API_PREFIX}/auth"), create_auth_router())
        .nest(&format!("{API_PREFIX}/employees"), create_employee_router())
        .nest(&format!("{API_PREFIX}/tasks"), create_task_router())
        .nest(&format!("{API_PREFIX}/messages"), create_message_router())
        .nest(&format!("{API_PREFIX}/admin"), create_admin_router())
        .route("/health", get(health))
        .route("/", get(root))
}

async fn health(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(json!({
        "success": true,
        "message": "Server is healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "environment": state.config.server.env,
    }))
}

async fn root() -> Json<serde_json::Value> {
    Json(json!({
        "success": true,
        "message": "Employee Management System API",
        "docs": "/api/docs",
    }))
}
