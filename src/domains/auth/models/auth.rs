use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domains::auth::models::user::UserResponse;

// 로그인 요청 모델
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LoginRequest {
    /// Email address
    /// 이메일 주소
    #[schema(example = "user@example.com")]
    pub email: String,

    /// Password
    /// 비밀번호
    #[schema(example = "password123")]
    pub password: String,
}

/// 로그인 응답 모델
/// Token fields live at the top level of the body (the client stores them
/// under the well-known accessToken/refreshToken keys).
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub success: bool,
    pub message: String,

    /// JWT Access Token (짧은 수명, 상태 없음)
    /// Short-lived stateless access token
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub access_token: String,

    /// Refresh Token (긴 수명, 해시가 서버에 저장됨)
    /// Long-lived refresh token (hash stored server-side for rotation)
    pub refresh_token: String,

    /// User information (without password)
    /// 사용자 정보 (비밀번호 제외)
    pub user: UserResponse,
}

// 회원가입 요청 모델
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub first_name: String,
    pub last_name: String,
    #[schema(example = "user@example.com")]
    pub email: String,
    /// Password (해싱 후 저장)
    #[schema(example = "password123")]
    pub password: String,
    pub position: Option<String>,
    pub phone_number: Option<String>,
}

// 토큰 갱신 요청 모델
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RefreshTokenRequest {
    /// Refresh Token
    /// 리프레시 토큰
    pub refresh_token: String,
}

/// 토큰 갱신 응답 모델 (새 토큰 쌍)
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RefreshTokenResponse {
    pub success: bool,
    pub message: String,
    /// 새 Access Token
    pub access_token: String,
    /// 새 Refresh Token (이전 토큰은 무효화됨)
    pub refresh_token: String,
}

// 로그아웃 요청 모델
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LogoutRequest {
    pub refresh_token: String,
}

// 비밀번호 변경 요청 모델
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

// 비밀번호 재설정 요청 (이메일로 토큰 발급)
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ForgotPasswordRequest {
    #[schema(example = "user@example.com")]
    pub email: String,
}

// 비밀번호 재설정 실행 (토큰 + 새 비밀번호)
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordRequest {
    pub token: String,
    pub new_password: String,
}

// 이메일 인증 요청
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct VerifyEmailRequest {
    pub token: String,
}
