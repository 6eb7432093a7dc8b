use crate::client::api_client::ApiClient;
use crate::client::error::ClientError;
use crate::client::token_store::StoredTokens;
use crate::domains::auth::models::{
    ChangePasswordRequest, ForgotPasswordRequest, LoginRequest, LoginResponse, LogoutRequest,
    RegisterRequest, ResetPasswordRequest, UserResponse, VerifyEmailRequest,
};
use crate::shared::models::ApiResponse;

/// Auth endpoints (로그인/로그아웃/비밀번호 관리)
impl ApiClient {
    /// Log in and persist the issued token pair
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, ClientError> {
        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };

        // 로그인은 토큰 부착/재시도 없이 그대로 전송
        let response: LoginResponse = self.post_unauthenticated("/auth/login", &request).await?;

        self.token_store().save(StoredTokens {
            access_token: response.access_token.clone(),
            refresh_token: response.refresh_token.clone(),
        })?;

        Ok(response)
    }

    pub async fn register(
        &self,
        request: &RegisterRequest,
    ) -> Result<ApiResponse<UserResponse>, ClientError> {
        self.post("/auth/register", request).await
    }

    /// Log out: revoke the session server-side, then drop local tokens
    /// 서버 세션 폐기 후 로컬 토큰 삭제
    pub async fn logout(&self) -> Result<(), ClientError> {
        if let Some(tokens) = self.token_store().load() {
            let request = LogoutRequest {
                refresh_token: tokens.refresh_token,
            };
            // 서버 호출이 실패해도 로컬 토큰은 지운다
            let _: Result<ApiResponse<()>, ClientError> = self.post("/auth/logout", &request).await;
        }

        self.token_store().clear();
        Ok(())
    }

    pub async fn current_user(&self) -> Result<ApiResponse<UserResponse>, ClientError> {
        self.get("/auth/me").await
    }

    pub async fn change_password(
        &self,
        current_password: &str,
        new_password: &str,
    ) -> Result<ApiResponse<()>, ClientError> {
        let request = ChangePasswordRequest {
            current_password: current_password.to_string(),
            new_password: new_password.to_string(),
        };
        self.post("/auth/change-password", &request).await
    }

    pub async fn forgot_password(&self, email: &str) -> Result<ApiResponse<()>, ClientError> {
        let request = ForgotPasswordRequest {
            email: email.to_string(),
        };
        self.post("/auth/forgot-password", &request).await
    }

    pub async fn reset_password(
        &self,
        token: &str,
        new_password: &str,
    ) -> Result<ApiResponse<()>, ClientError> {
        let request = ResetPasswordRequest {
            token: token.to_string(),
            new_password: new_password.to_string(),
        };
        self.post("/auth/reset-password", &request).await
    }

    pub async fn verify_email(&self, token: &str) -> Result<ApiResponse<()>, ClientError> {
        let request = VerifyEmailRequest {
            token: token.to_string(),
        };
        self.post("/auth/verify-email", &request).await
    }
}
