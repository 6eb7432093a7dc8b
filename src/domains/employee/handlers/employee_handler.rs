use axum::{
    extract::{Path, State},
    Json,
};

use crate::domains::auth::models::UserResponse;
use crate::domains::employee::models::{UpdateEmployeeRequest, UpdateProfileRequest};
use crate::shared::errors::ApiError;
use crate::shared::middleware::auth::{AuthenticatedUser, RequireManager};
use crate::shared::models::ApiResponse;
use crate::shared::services::AppState;

/// 직원 조회 핸들러
#[utoipa::path(
    get,
    path = "/api/v1/employees/{id}",
    params(("id" = u64, Path, description = "User ID")),
    responses(
        (status = 200, description = "Employee profile", body = UserResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "User not found")
    ),
    security(("BearerAuth" = [])),
    tag = "Employees"
)]
pub async fn get_employee(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<u64>,
) -> Result<Json<ApiResponse<UserResponse>>, ApiError> {
    let employee = app_state
        .employee_state
        .employee_service
        .get_employee(id)
        .await?;

    Ok(Json(ApiResponse::data(employee.into())))
}

/// 본인 프로필 수정 핸들러
/// Self-service update; cannot touch role/status/email.
#[utoipa::path(
    put,
    path = "/api/v1/employees/profile",
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Profile updated", body = UserResponse),
        (status = 401, description = "Unauthorized")
    ),
    security(("BearerAuth" = [])),
    tag = "Employees"
)]
pub async fn update_profile(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Json(request): Json<UpdateProfileRequest>,
) -> Result<Json<ApiResponse<UserResponse>>, ApiError> {
    let updated = app_state
        .employee_state
        .employee_service
        .update_profile(user.user_id, request)
        .await?;

    Ok(Json(ApiResponse::with_message(
        "Profile updated successfully",
        updated.into(),
    )))
}

/// 직원 정보 수정 핸들러 (관리자/매니저)
#[utoipa::path(
    put,
    path = "/api/v1/employees/{id}",
    params(("id" = u64, Path, description = "User ID")),
    request_body = UpdateEmployeeRequest,
    responses(
        (status = 200, description = "Employee updated", body = UserResponse),
        (status = 400, description = "Email already in use"),
        (status = 403, description = "Requires manager role"),
        (status = 404, description = "User not found")
    ),
    security(("BearerAuth" = [])),
    tag = "Employees"
)]
pub async fn update_employee(
    State(app_state): State<AppState>,
    RequireManager(actor): RequireManager,
    Path(id): Path<u64>,
    Json(request): Json<UpdateEmployeeRequest>,
) -> Result<Json<ApiResponse<UserResponse>>, ApiError> {
    let updated = app_state
        .employee_state
        .employee_service
        .update_employee(id, request, actor.user_id)
        .await?;

    Ok(Json(ApiResponse::with_message(
        "Employee updated successfully",
        updated.into(),
    )))
}

/// 부서 구성원 목록 핸들러
#[utoipa::path(
    get,
    path = "/api/v1/employees/department/{id}",
    params(("id" = u64, Path, description = "Department ID")),
    responses(
        (status = 200, description = "Department members", body = [UserResponse]),
        (status = 404, description = "Department not found")
    ),
    security(("BearerAuth" = [])),
    tag = "Employees"
)]
pub async fn department_members(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<u64>,
) -> Result<Json<ApiResponse<Vec<UserResponse>>>, ApiError> {
    let members = app_state
        .employee_state
        .employee_service
        .department_members(id)
        .await?;

    Ok(Json(ApiResponse::data(
        members.into_iter().map(UserResponse::from).collect(),
    )))
}
