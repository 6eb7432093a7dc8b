use argon2::password_hash::{rand_core::OsRng, SaltString};
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use chrono::{Duration, Utc};

use crate::domains::auth::models::{
    ChangePasswordRequest, LoginRequest, RefreshTokenCreate, RegisterRequest, TokenPurpose, User,
};
use crate::domains::auth::models::user::{Role, UserStatus};
use crate::domains::auth::services::TokenService;
use crate::shared::database::{
    CredentialTokenRepository, Database, NewUser, RefreshTokenRepository, UserRepository,
};
use crate::shared::errors::ApiError;

/// 일회용 토큰 수명 (비밀번호 재설정/이메일 인증)
const CREDENTIAL_TOKEN_EXPIRY_HOURS: i64 = 1;

// 인증 서비스
// 역할: 로그인/토큰 회전/자격 증명 흐름의 비즈니스 로직
// AuthService: authentication business logic
#[derive(Clone)]
pub struct AuthService {
    db: Database,
    token_service: TokenService,
}

impl AuthService {
    pub fn new(db: Database, token_service: TokenService) -> Self {
        Self { db, token_service }
    }

    // 회원가입 (비즈니스 로직)
    pub async fn register(&self, request: RegisterRequest) -> Result<User, ApiError> {
        let mut errors = Vec::new();
        validate_email(&request.email, &mut errors);
        validate_password(&request.password, &mut errors);
        if request.first_name.trim().is_empty() {
            errors.push("firstName is required".to_string());
        }
        if request.last_name.trim().is_empty() {
            errors.push("lastName is required".to_string());
        }
        if !errors.is_empty() {
            return Err(ApiError::validation(errors));
        }

        let user_repo = UserRepository::new(self.db.pool().clone());

        // 이메일 중복 확인 (고유 제약과 이중 방어)
        if user_repo
            .find_by_email(&request.email)
            .await
            .map_err(|e| ApiError::db("User", e))?
            .is_some()
        {
            return Err(ApiError::Conflict(
                "User with this email already exists".to_string(),
            ));
        }

        let password_hash = Self::hash_password(&request.password)?;

        let user = user_repo
            .create(NewUser {
                first_name: request.first_name.trim(),
                last_name: request.last_name.trim(),
                email: &request.email,
                password_hash: &password_hash,
                role: Role::Employee,
                department_id: None,
                position: request.position.as_deref(),
                phone_number: request.phone_number.as_deref(),
                created_by: None,
            })
            .await
            .map_err(|e| ApiError::db("User", e))?;

        Ok(user)
    }

    /// 로그인: 자격 증명 검증 후 토큰 쌍 발급
    /// Returns (user, access_token, refresh_token). A fresh login revokes the
    /// user's previous refresh tokens.
    pub async fn login(&self, request: LoginRequest) -> Result<(User, String, String), ApiError> {
        let user_repo = UserRepository::new(self.db.pool().clone());

        let user = user_repo
            .find_by_email(&request.email)
            .await
            .map_err(|e| ApiError::db("User", e))?
            .ok_or(ApiError::InvalidCredentials)?;

        Self::verify_password(&request.password, &user.password_hash)?;

        if user.status == UserStatus::Inactive {
            return Err(ApiError::Forbidden);
        }

        // 이전 Refresh Token 무효화 (새 로그인 시 기존 세션 종료)
        let refresh_repo = RefreshTokenRepository::new(self.db.pool().clone());
        refresh_repo
            .revoke_all_for_user(user.id)
            .await
            .map_err(|e| ApiError::db("RefreshToken", e))?;

        let (access_token, refresh_token) =
            self.token_service.issue_token_pair(user.id, user.role)?;
        self.store_refresh_token(user.id, &refresh_token).await?;

        tracing::info!(user_id = user.id, "user logged in");
        Ok((user, access_token, refresh_token))
    }

    /// Refresh Token 검증 및 새 토큰 쌍 발급 (회전)
    /// Verify the refresh token and rotate the pair. The signed token must
    /// also match a stored, unrevoked hash; rotation revokes the old one
    /// before storing the new one.
    pub async fn refresh(&self, refresh_token: &str) -> Result<(String, String), ApiError> {
        // 1. 서명/만료 검증
        let claims = self.token_service.verify_refresh_token(refresh_token)?;

        // 2. 저장된 해시와 대조
        let refresh_repo = RefreshTokenRepository::new(self.db.pool().clone());
        let token_hash = self.token_service.hash_token(refresh_token);
        let stored = refresh_repo
            .find_by_token_hash(&token_hash)
            .await
            .map_err(|e| ApiError::db("RefreshToken", e))?
            .ok_or(ApiError::InvalidToken)?;

        if stored.revoked {
            // 이미 회전된 토큰 재사용 시도
            tracing::warn!(user_id = claims.sub, "revoked refresh token presented");
            return Err(ApiError::InvalidToken);
        }
        if stored.expires_at < Utc::now() {
            return Err(ApiError::TokenExpired);
        }

        // 3. 사용자 확인 (삭제/비활성 계정은 갱신 불가)
        let user_repo = UserRepository::new(self.db.pool().clone());
        let user = user_repo
            .find_by_id(claims.sub)
            .await
            .map_err(|e| ApiError::db("User", e))?
            .ok_or(ApiError::InvalidToken)?;
        if user.status == UserStatus::Inactive {
            return Err(ApiError::Forbidden);
        }

        // 4. 기존 토큰 무효화 후 새 쌍 발급 (회전)
        refresh_repo
            .revoke(&token_hash)
            .await
            .map_err(|e| ApiError::db("RefreshToken", e))?;

        let (access_token, new_refresh_token) =
            self.token_service.issue_token_pair(user.id, user.role)?;
        self.store_refresh_token(user.id, &new_refresh_token)
            .await?;

        Ok((access_token, new_refresh_token))
    }

    /// 로그아웃 - Refresh Token 무효화 (멱등)
    /// Logout: revoke the refresh token server-side; the client clears its
    /// own storage regardless.
    pub async fn logout(&self, refresh_token: &str) -> Result<(), ApiError> {
        let refresh_repo = RefreshTokenRepository::new(self.db.pool().clone());
        let token_hash = self.token_service.hash_token(refresh_token);

        refresh_repo
            .revoke(&token_hash)
            .await
            .map_err(|e| ApiError::db("RefreshToken", e))?;

        Ok(())
    }

    pub async fn get_user_info(&self, user_id: u64) -> Result<User, ApiError> {
        let user_repo = UserRepository::new(self.db.pool().clone());

        user_repo
            .find_by_id(user_id)
            .await
            .map_err(|e| ApiError::db("User", e))?
            .ok_or(ApiError::NotFound { entity: "User" })
    }

    /// 비밀번호 변경: 기존 비밀번호 확인 후 재해싱, 모든 세션 종료
    pub async fn change_password(
        &self,
        user_id: u64,
        request: ChangePasswordRequest,
    ) -> Result<(), ApiError> {
        let mut errors = Vec::new();
        validate_password(&request.new_password, &mut errors);
        if !errors.is_empty() {
            return Err(ApiError::validation(errors));
        }

        let user = self.get_user_info(user_id).await?;
        Self::verify_password(&request.current_password, &user.password_hash)?;

        let password_hash = Self::hash_password(&request.new_password)?;
        let user_repo = UserRepository::new(self.db.pool().clone());
        user_repo
            .update_password(user_id, &password_hash)
            .await
            .map_err(|e| ApiError::db("User", e))?;

        // 비밀번호 변경 시 기존 세션 전부 종료
        let refresh_repo = RefreshTokenRepository::new(self.db.pool().clone());
        refresh_repo
            .revoke_all_for_user(user_id)
            .await
            .map_err(|e| ApiError::db("RefreshToken", e))?;

        Ok(())
    }

    /// 비밀번호 재설정 토큰 발급
    /// Issues a one-time reset token. Always succeeds from the caller's view
    /// so the endpoint does not disclose which emails exist; actual delivery
    /// is an external collaborator.
    pub async fn forgot_password(&self, email: &str) -> Result<(), ApiError> {
        let user_repo = UserRepository::new(self.db.pool().clone());
        let user = match user_repo
            .find_by_email(email)
            .await
            .map_err(|e| ApiError::db("User", e))?
        {
            Some(user) => user,
            None => {
                tracing::info!(email, "password reset requested for unknown email");
                return Ok(());
            }
        };

        let token = self
            .issue_credential_token(user.id, TokenPurpose::PasswordReset)
            .await?;
        tracing::info!(
            user_id = user.id,
            token,
            "password reset token issued (delivery handled externally)"
        );

        Ok(())
    }

    /// 비밀번호 재설정 실행 (토큰 1회 사용)
    pub async fn reset_password(&self, token: &str, new_password: &str) -> Result<(), ApiError> {
        let mut errors = Vec::new();
        validate_password(new_password, &mut errors);
        if !errors.is_empty() {
            return Err(ApiError::validation(errors));
        }

        let record = self
            .consume_credential_token(token, TokenPurpose::PasswordReset)
            .await?;

        let password_hash = Self::hash_password(new_password)?;
        let user_repo = UserRepository::new(self.db.pool().clone());
        user_repo
            .update_password(record.user_id as u64, &password_hash)
            .await
            .map_err(|e| ApiError::db("User", e))?;

        let refresh_repo = RefreshTokenRepository::new(self.db.pool().clone());
        refresh_repo
            .revoke_all_for_user(record.user_id as u64)
            .await
            .map_err(|e| ApiError::db("RefreshToken", e))?;

        Ok(())
    }

    /// 이메일 인증 토큰 발급 (가입 직후 호출)
    pub async fn issue_email_verification(&self, user_id: u64) -> Result<(), ApiError> {
        let token = self
            .issue_credential_token(user_id, TokenPurpose::EmailVerify)
            .await?;
        tracing::info!(
            user_id,
            token,
            "email verification token issued (delivery handled externally)"
        );
        Ok(())
    }

    /// 이메일 인증 실행
    pub async fn verify_email(&self, token: &str) -> Result<(), ApiError> {
        let record = self
            .consume_credential_token(token, TokenPurpose::EmailVerify)
            .await?;

        let user_repo = UserRepository::new(self.db.pool().clone());
        user_repo
            .set_email_verified(record.user_id as u64)
            .await
            .map_err(|e| ApiError::db("User", e))?;

        Ok(())
    }

    /// Refresh Token 해시 저장 (만료는 토큰과 동일)
    async fn store_refresh_token(&self, user_id: u64, refresh_token: &str) -> Result<(), ApiError> {
        let refresh_repo = RefreshTokenRepository::new(self.db.pool().clone());

        refresh_repo
            .create(RefreshTokenCreate {
                user_id,
                token_hash: self.token_service.hash_token(refresh_token),
                expires_at: Utc::now() + self.token_service.refresh_ttl(),
            })
            .await
            .map_err(|e| ApiError::db("RefreshToken", e))?;

        Ok(())
    }

    async fn issue_credential_token(
        &self,
        user_id: u64,
        purpose: TokenPurpose,
    ) -> Result<String, ApiError> {
        let token = self.token_service.generate_one_time_token();
        let token_hash = self.token_service.hash_token(&token);
        let expires_at = Utc::now() + Duration::hours(CREDENTIAL_TOKEN_EXPIRY_HOURS);

        let repo = CredentialTokenRepository::new(self.db.pool().clone());
        repo.create(user_id, &token_hash, purpose, expires_at)
            .await
            .map_err(|e| ApiError::db("CredentialToken", e))?;

        Ok(token)
    }

    async fn consume_credential_token(
        &self,
        token: &str,
        purpose: TokenPurpose,
    ) -> Result<crate::domains::auth::models::CredentialTokenRecord, ApiError> {
        let repo = CredentialTokenRepository::new(self.db.pool().clone());
        let token_hash = self.token_service.hash_token(token);

        let record = repo
            .find_by_token_hash(&token_hash, purpose)
            .await
            .map_err(|e| ApiError::db("CredentialToken", e))?
            .ok_or(ApiError::InvalidToken)?;

        if !record.is_usable() {
            return Err(ApiError::InvalidToken);
        }

        repo.consume(record.id)
            .await
            .map_err(|e| ApiError::db("CredentialToken", e))?;

        Ok(record)
    }

    pub(crate) fn hash_password(password: &str) -> Result<String, ApiError> {
        let salt = SaltString::generate(&mut OsRng);

        let password_hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| ApiError::Internal(format!("Failed to hash password: {}", e)))?
            .to_string();

        Ok(password_hash)
    }

    fn verify_password(password: &str, password_hash: &str) -> Result<(), ApiError> {
        let parsed_hash = PasswordHash::new(password_hash)
            .map_err(|e| ApiError::Internal(format!("Invalid password hash: {}", e)))?;

        Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .map_err(|_| ApiError::InvalidCredentials)?;

        Ok(())
    }
}

pub(crate) fn validate_email(email: &str, errors: &mut Vec<String>) {
    let valid = email.contains('@') && email.contains('.') && !email.contains(char::is_whitespace);
    if !valid {
        errors.push("email must be a valid email address".to_string());
    }
}

pub(crate) fn validate_password(password: &str, errors: &mut Vec<String>) {
    if password.len() < 8 {
        errors.push("password must be at least 8 characters".to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_hash_round_trip() {
        let hash = AuthService::hash_password("correct horse battery").unwrap();
        assert!(AuthService::verify_password("correct horse battery", &hash).is_ok());
        assert!(matches!(
            AuthService::verify_password("wrong password", &hash),
            Err(ApiError::InvalidCredentials)
        ));
    }

    #[test]
    fn email_validation_rejects_garbage() {
        let mut errors = Vec::new();
        validate_email("not-an-email", &mut errors);
        validate_email("white space@example.com", &mut errors);
        assert_eq!(errors.len(), 2);

        errors.clear();
        validate_email("user@example.com", &mut errors);
        assert!(errors.is_empty());
    }

    #[test]
    fn short_passwords_are_rejected() {
        let mut errors = Vec::new();
        validate_password("short", &mut errors);
        assert_eq!(errors.len(), 1);
    }
}
