use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::domains::task::models::{
    AssignTaskRequest, CreateTaskRequest, Task, TaskListQuery, UpdateTaskRequest,
    UpdateTaskStatusRequest,
};
use crate::shared::errors::ApiError;
use crate::shared::middleware::auth::{AuthenticatedUser, RequireManager};
use crate::shared::models::{ApiResponse, ListResponse};
use crate::shared::services::AppState;
use crate::shared::utils::pagination::PageParams;

/// 업무 목록 핸들러
#[utoipa::path(
    get,
    path = "/api/v1/tasks",
    params(TaskListQuery),
    responses(
        (status = 200, description = "Paginated task list", body = [Task]),
        (status = 401, description = "Unauthorized")
    ),
    security(("BearerAuth" = [])),
    tag = "Tasks"
)]
pub async fn list_tasks(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
    Query(query): Query<TaskListQuery>,
) -> Result<Json<ListResponse<Task>>, ApiError> {
    let (tasks, total) = app_state.task_state.task_service.list(&query).await?;

    let params = PageParams {
        page: query.page,
        limit: query.limit,
    };
    Ok(Json(ListResponse::new(tasks, total, &params)))
}

/// 내 업무 목록 핸들러
#[utoipa::path(
    get,
    path = "/api/v1/tasks/me",
    params(PageParams),
    responses(
        (status = 200, description = "Tasks assigned to the caller", body = [Task]),
        (status = 401, description = "Unauthorized")
    ),
    security(("BearerAuth" = [])),
    tag = "Tasks"
)]
pub async fn my_tasks(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Query(params): Query<PageParams>,
) -> Result<Json<ListResponse<Task>>, ApiError> {
    let (tasks, total) = app_state
        .task_state
        .task_service
        .my_tasks(user.user_id, &params)
        .await?;

    Ok(Json(ListResponse::new(tasks, total, &params)))
}

/// 업무 단건 조회 핸들러
#[utoipa::path(
    get,
    path = "/api/v1/tasks/{id}",
    params(("id" = u64, Path, description = "Task ID")),
    responses(
        (status = 200, description = "Task detail", body = Task),
        (status = 404, description = "Task not found")
    ),
    security(("BearerAuth" = [])),
    tag = "Tasks"
)]
pub async fn get_task(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<u64>,
) -> Result<Json<ApiResponse<Task>>, ApiError> {
    let task = app_state.task_state.task_service.get_task(id).await?;

    Ok(Json(ApiResponse::data(task)))
}

/// 업무 생성 핸들러 (관리자/매니저)
#[utoipa::path(
    post,
    path = "/api/v1/tasks",
    request_body = CreateTaskRequest,
    responses(
        (status = 201, description = "Task created", body = Task),
        (status = 400, description = "Validation failed"),
        (status = 403, description = "Requires manager role")
    ),
    security(("BearerAuth" = [])),
    tag = "Tasks"
)]
pub async fn create_task(
    State(app_state): State<AppState>,
    RequireManager(actor): RequireManager,
    Json(request): Json<CreateTaskRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Task>>), ApiError> {
    let task = app_state
        .task_state
        .task_service
        .create_task(request, actor.user_id)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message("Task created successfully", task)),
    ))
}

/// 업무 수정 핸들러 (관리자/매니저)
#[utoipa::path(
    put,
    path = "/api/v1/tasks/{id}",
    params(("id" = u64, Path, description = "Task ID")),
    request_body = UpdateTaskRequest,
    responses(
        (status = 200, description = "Task updated", body = Task),
        (status = 403, description = "Requires manager role"),
        (status = 404, description = "Task not found")
    ),
    security(("BearerAuth" = [])),
    tag = "Tasks"
)]
pub async fn update_task(
    State(app_state): State<AppState>,
    RequireManager(actor): RequireManager,
    Path(id): Path<u64>,
    Json(request): Json<UpdateTaskRequest>,
) -> Result<Json<ApiResponse<Task>>, ApiError> {
    let task = app_state
        .task_state
        .task_service
        .update_task(id, request, actor.user_id)
        .await?;

    Ok(Json(ApiResponse::with_message(
        "Task updated successfully",
        task,
    )))
}

/// 업무 삭제 핸들러 (관리자/매니저)
#[utoipa::path(
    delete,
    path = "/api/v1/tasks/{id}",
    params(("id" = u64, Path, description = "Task ID")),
    responses(
        (status = 200, description = "Task deleted"),
        (status = 403, description = "Requires manager role"),
        (status = 404, description = "Task not found")
    ),
    security(("BearerAuth" = [])),
    tag = "Tasks"
)]
pub async fn delete_task(
    State(app_state): State<AppState>,
    RequireManager(_actor): RequireManager,
    Path(id): Path<u64>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    app_state.task_state.task_service.delete_task(id).await?;

    Ok(Json(ApiResponse::message("Task deleted successfully")))
}

/// 업무 할당 핸들러 (관리자/매니저)
/// Assigning moves the task to in-progress.
#[utoipa::path(
    post,
    path = "/api/v1/tasks/{id}/assign",
    params(("id" = u64, Path, description = "Task ID")),
    request_body = AssignTaskRequest,
    responses(
        (status = 200, description = "Task assigned", body = Task),
        (status = 400, description = "Assignee is inactive"),
        (status = 403, description = "Requires manager role"),
        (status = 404, description = "Task or user not found")
    ),
    security(("BearerAuth" = [])),
    tag = "Tasks"
)]
pub async fn assign_task(
    State(app_state): State<AppState>,
    RequireManager(actor): RequireManager,
    Path(id): Path<u64>,
    Json(request): Json<AssignTaskRequest>,
) -> Result<Json<ApiResponse<Task>>, ApiError> {
    let task = app_state
        .task_state
        .task_service
        .assign_task(id, request.user_id, actor.user_id)
        .await?;

    Ok(Json(ApiResponse::with_message(
        "Task assigned successfully",
        task,
    )))
}

/// 업무 상태 변경 핸들러 (담당자 본인 또는 관리 권한)
#[utoipa::path(
    patch,
    path = "/api/v1/tasks/{id}/status",
    params(("id" = u64, Path, description = "Task ID")),
    request_body = UpdateTaskStatusRequest,
    responses(
        (status = 200, description = "Status updated", body = Task),
        (status = 403, description = "Not the assignee and not a manager"),
        (status = 404, description = "Task not found")
    ),
    security(("BearerAuth" = [])),
    tag = "Tasks"
)]
pub async fn update_task_status(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<u64>,
    Json(request): Json<UpdateTaskStatusRequest>,
) -> Result<Json<ApiResponse<Task>>, ApiError> {
    let task = app_state
        .task_state
        .task_service
        .update_status(id, request.status, user)
        .await?;

    Ok(Json(ApiResponse::with_message(
        "Task status updated successfully",
        task,
    )))
}
