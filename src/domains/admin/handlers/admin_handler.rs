use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::domains::admin::models::{
    CreateDepartmentRequest, CreateUserRequest, Department, SystemStats, UpdateUserRequest,
    UserListQuery,
};
use crate::domains::auth::models::UserResponse;
use crate::shared::errors::ApiError;
use crate::shared::middleware::auth::RequireAdmin;
use crate::shared::models::{ApiResponse, ListResponse};
use crate::shared::services::AppState;
use crate::shared::utils::pagination::PageParams;

/// 사용자 목록 핸들러 (관리자)
#[utoipa::path(
    get,
    path = "/api/v1/admin/users",
    params(UserListQuery),
    responses(
        (status = 200, description = "Paginated user list", body = [UserResponse]),
        (status = 403, description = "Requires admin role")
    ),
    security(("BearerAuth" = [])),
    tag = "Admin"
)]
pub async fn list_users(
    State(app_state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Query(query): Query<UserListQuery>,
) -> Result<Json<ListResponse<UserResponse>>, ApiError> {
    let (users, total) = app_state.admin_state.admin_service.list_users(&query).await?;

    let params = PageParams {
        page: query.page,
        limit: query.limit,
    };
    Ok(Json(ListResponse::new(
        users.into_iter().map(UserResponse::from).collect(),
        total,
        &params,
    )))
}

/// 사용자 생성 핸들러 (관리자)
#[utoipa::path(
    post,
    path = "/api/v1/admin/users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = UserResponse),
        (status = 400, description = "Validation failed or email taken"),
        (status = 403, description = "Requires admin role")
    ),
    security(("BearerAuth" = [])),
    tag = "Admin"
)]
pub async fn create_user(
    State(app_state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Json(request): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<ApiResponse<UserResponse>>), ApiError> {
    let user = app_state
        .admin_state
        .admin_service
        .create_user(request, admin.user_id)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(
            "User created successfully",
            user.into(),
        )),
    ))
}

/// 사용자 수정 핸들러 (관리자)
#[utoipa::path(
    put,
    path = "/api/v1/admin/users/{id}",
    params(("id" = u64, Path, description = "User ID")),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "User updated", body = UserResponse),
        (status = 403, description = "Requires admin role"),
        (status = 404, description = "User not found")
    ),
    security(("BearerAuth" = [])),
    tag = "Admin"
)]
pub async fn update_user(
    State(app_state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<u64>,
    Json(request): Json<UpdateUserRequest>,
) -> Result<Json<ApiResponse<UserResponse>>, ApiError> {
    let user = app_state
        .admin_state
        .admin_service
        .update_user(id, request, admin.user_id)
        .await?;

    Ok(Json(ApiResponse::with_message(
        "User updated successfully",
        user.into(),
    )))
}

/// 사용자 삭제 핸들러 (관리자)
#[utoipa::path(
    delete,
    path = "/api/v1/admin/users/{id}",
    params(("id" = u64, Path, description = "User ID")),
    responses(
        (status = 200, description = "User deleted"),
        (status = 400, description = "Cannot delete own account"),
        (status = 403, description = "Requires admin role"),
        (status = 404, description = "User not found")
    ),
    security(("BearerAuth" = [])),
    tag = "Admin"
)]
pub async fn delete_user(
    State(app_state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<u64>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    app_state
        .admin_state
        .admin_service
        .delete_user(id, admin.user_id)
        .await?;

    Ok(Json(ApiResponse::message("User deleted successfully")))
}

/// 부서 목록 핸들러 (관리자)
#[utoipa::path(
    get,
    path = "/api/v1/admin/departments",
    responses(
        (status = 200, description = "All departments", body = [Department]),
        (status = 403, description = "Requires admin role")
    ),
    security(("BearerAuth" = [])),
    tag = "Admin"
)]
pub async fn list_departments(
    State(app_state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> Result<Json<ApiResponse<Vec<Department>>>, ApiError> {
    let departments = app_state.admin_state.admin_service.list_departments().await?;

    Ok(Json(ApiResponse::data(departments)))
}

/// 부서 생성 핸들러 (관리자)
#[utoipa::path(
    post,
    path = "/api/v1/admin/departments",
    request_body = CreateDepartmentRequest,
    responses(
        (status = 201, description = "Department created", body = Department),
        (status = 400, description = "Name missing or already taken"),
        (status = 403, description = "Requires admin role")
    ),
    security(("BearerAuth" = [])),
    tag = "Admin"
)]
pub async fn create_department(
    State(app_state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Json(request): Json<CreateDepartmentRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Department>>), ApiError> {
    let department = app_state
        .admin_state
        .admin_service
        .create_department(request, admin.user_id)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(
            "Department created successfully",
            department,
        )),
    ))
}

/// 부서 삭제 핸들러 (관리자)
#[utoipa::path(
    delete,
    path = "/api/v1/admin/departments/{id}",
    params(("id" = u64, Path, description = "Department ID")),
    responses(
        (status = 200, description = "Department deleted"),
        (status = 400, description = "Department still has members"),
        (status = 403, description = "Requires admin role"),
        (status = 404, description = "Department not found")
    ),
    security(("BearerAuth" = [])),
    tag = "Admin"
)]
pub async fn delete_department(
    State(app_state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<u64>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    app_state
        .admin_state
        .admin_service
        .delete_department(id)
        .await?;

    Ok(Json(ApiResponse::message("Department deleted successfully")))
}

/// 시스템 통계 핸들러 (관리자)
#[utoipa::path(
    get,
    path = "/api/v1/admin/stats",
    responses(
        (status = 200, description = "System statistics", body = SystemStats),
        (status = 403, description = "Requires admin role")
    ),
    security(("BearerAuth" = [])),
    tag = "Admin"
)]
pub async fn system_stats(
    State(app_state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> Result<Json<ApiResponse<SystemStats>>, ApiError> {
    let stats = app_state.admin_state.admin_service.system_stats().await?;

    Ok(Json(ApiResponse::data(stats)))
}
