use axum::{extract::State, http::StatusCode, Json};

use crate::domains::auth::models::{
    ChangePasswordRequest, ForgotPasswordRequest, LoginRequest, LoginResponse, LogoutRequest,
    RefreshTokenRequest, RefreshTokenResponse, RegisterRequest, ResetPasswordRequest, UserResponse,
    VerifyEmailRequest,
};
use crate::shared::errors::ApiError;
use crate::shared::middleware::auth::AuthenticatedUser;
use crate::shared::models::ApiResponse;
use crate::shared::services::AppState;

/// 로그인 핸들러
/// Issues an access/refresh pair for valid credentials.
#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 401, description = "Invalid email or password"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Auth"
)]
pub async fn login(
    State(app_state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let (user, access_token, refresh_token) =
        app_state.auth_state.auth_service.login(request).await?;

    Ok(Json(LoginResponse {
        success: true,
        message: "Login successful".to_string(),
        access_token,
        refresh_token,
        user: user.into(),
    }))
}

/// 토큰 갱신 핸들러 (Refresh Token 회전)
/// Exchanges a refresh token for a new pair; the old one is revoked.
#[utoipa::path(
    post,
    path = "/api/v1/auth/refresh-token",
    request_body = RefreshTokenRequest,
    responses(
        (status = 200, description = "Token refreshed successfully", body = RefreshTokenResponse),
        (status = 401, description = "Invalid or expired refresh token"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Auth"
)]
pub async fn refresh_token(
    State(app_state): State<AppState>,
    Json(request): Json<RefreshTokenRequest>,
) -> Result<Json<RefreshTokenResponse>, ApiError> {
    let (access_token, refresh_token) = app_state
        .auth_state
        .auth_service
        .refresh(&request.refresh_token)
        .await?;

    Ok(Json(RefreshTokenResponse {
        success: true,
        message: "Token refreshed successfully".to_string(),
        access_token,
        refresh_token,
    }))
}

// 회원가입 핸들러
#[utoipa::path(
    post,
    path = "/api/v1/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered successfully", body = UserResponse),
        (status = 400, description = "Validation error or duplicate email"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Auth"
)]
pub async fn register(
    State(app_state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<ApiResponse<UserResponse>>), ApiError> {
    let user = app_state.auth_state.auth_service.register(request).await?;

    // 가입 직후 이메일 인증 토큰 발급 (전달은 외부 협력자 몫)
    app_state
        .auth_state
        .auth_service
        .issue_email_verification(user.id)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(
            "User registered successfully",
            user.into(),
        )),
    ))
}

/// 로그아웃 핸들러 (서버 측 Refresh Token 무효화)
#[utoipa::path(
    post,
    path = "/api/v1/auth/logout",
    request_body = LogoutRequest,
    responses(
        (status = 200, description = "Logout successful"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Auth"
)]
pub async fn logout(
    State(app_state): State<AppState>,
    Json(request): Json<LogoutRequest>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    app_state
        .auth_state
        .auth_service
        .logout(&request.refresh_token)
        .await?;

    Ok(Json(ApiResponse::message("Logout successful")))
}

/// 현재 사용자 조회
#[utoipa::path(
    get,
    path = "/api/v1/auth/me",
    responses(
        (status = 200, description = "Current user profile", body = UserResponse),
        (status = 401, description = "Unauthorized")
    ),
    security(("BearerAuth" = [])),
    tag = "Auth"
)]
pub async fn get_me(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<Json<ApiResponse<UserResponse>>, ApiError> {
    let profile = app_state
        .auth_state
        .auth_service
        .get_user_info(user.user_id)
        .await?;

    Ok(Json(ApiResponse::data(profile.into())))
}

// 비밀번호 변경 핸들러
#[utoipa::path(
    post,
    path = "/api/v1/auth/change-password",
    request_body = ChangePasswordRequest,
    responses(
        (status = 200, description = "Password changed"),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Wrong current password or unauthorized")
    ),
    security(("BearerAuth" = [])),
    tag = "Auth"
)]
pub async fn change_password(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Json(request): Json<ChangePasswordRequest>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    app_state
        .auth_state
        .auth_service
        .change_password(user.user_id, request)
        .await?;

    Ok(Json(ApiResponse::message("Password changed successfully")))
}

/// 비밀번호 재설정 토큰 발급
/// Always answers 200 so the endpoint does not reveal which emails exist.
#[utoipa::path(
    post,
    path = "/api/v1/auth/forgot-password",
    request_body = ForgotPasswordRequest,
    responses(
        (status = 200, description = "Reset token issued if the account exists")
    ),
    tag = "Auth"
)]
pub async fn forgot_password(
    State(app_state): State<AppState>,
    Json(request): Json<ForgotPasswordRequest>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    app_state
        .auth_state
        .auth_service
        .forgot_password(&request.email)
        .await?;

    Ok(Json(ApiResponse::message(
        "If the account exists, a reset token has been issued",
    )))
}

// 비밀번호 재설정 실행
#[utoipa::path(
    post,
    path = "/api/v1/auth/reset-password",
    request_body = ResetPasswordRequest,
    responses(
        (status = 200, description = "Password reset"),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Invalid or expired reset token")
    ),
    tag = "Auth"
)]
pub async fn reset_password(
    State(app_state): State<AppState>,
    Json(request): Json<ResetPasswordRequest>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    app_state
        .auth_state
        .auth_service
        .reset_password(&request.token, &request.new_password)
        .await?;

    Ok(Json(ApiResponse::message("Password reset successfully")))
}

// 이메일 인증 실행
#[utoipa::path(
    post,
    path = "/api/v1/auth/verify-email",
    request_body = VerifyEmailRequest,
    responses(
        (status = 200, description = "Email verified"),
        (status = 401, description = "Invalid or expired verification token")
    ),
    tag = "Auth"
)]
pub async fn verify_email(
    State(app_state): State<AppState>,
    Json(request): Json<VerifyEmailRequest>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    app_state
        .auth_state
        .auth_service
        .verify_email(&request.token)
        .await?;

    Ok(Json(ApiResponse::message("Email verified successfully")))
}
