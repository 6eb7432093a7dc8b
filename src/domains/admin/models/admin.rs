use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domains::auth::models::user::{Role, UserStatus};

/// 관리자 사용자 목록 쿼리
/// page/limit pagination plus optional equality filters and a
/// case-insensitive substring search over first/last name and email.
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct UserListQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub role: Option<Role>,
    pub department: Option<u64>,
    pub status: Option<UserStatus>,
    pub search: Option<String>,
}

// 관리자 사용자 생성 요청
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    pub first_name: String,
    pub last_name: String,
    #[schema(example = "user@example.com")]
    pub email: String,
    pub password: String,
    /// 기본값 employee
    pub role: Option<Role>,
    pub department_id: Option<u64>,
    pub position: Option<String>,
    pub phone_number: Option<String>,
}

// 관리자 사용자 수정 요청 (없는 필드는 기존 값 유지)
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub role: Option<Role>,
    pub status: Option<UserStatus>,
    pub department_id: Option<u64>,
    pub position: Option<String>,
    pub phone_number: Option<String>,
}
