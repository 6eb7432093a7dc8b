use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domains::auth::models::user::Role;

/// 본인 프로필 수정 요청 (이름/직책/전화번호만)
/// Self-service profile update; role/status/email are not updatable here.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub position: Option<String>,
    pub phone_number: Option<String>,
}

/// 직원 정보 수정 요청 (관리자/매니저용)
/// Manager-level employee update; email change re-checks uniqueness.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEmployeeRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub role: Option<Role>,
    pub department_id: Option<u64>,
    pub position: Option<String>,
    pub phone_number: Option<String>,
}
