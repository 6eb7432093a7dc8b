use chrono::Duration;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use rand::distributions::Alphanumeric;
use rand::Rng;
use sha2::{Digest, Sha256};

use crate::domains::auth::models::jwt::Claims;
use crate::domains::auth::models::user::Role;
use crate::shared::config::JwtConfig;
use crate::shared::errors::ApiError;

/// Token Service
/// 역할: Access/Refresh 토큰 발급 및 검증
///
/// Access and refresh tokens are signed with distinct secrets and distinct
/// expiries. Verification is a pure computation (signature check + expiry
/// comparison); the service is read-only after construction and cheap to
/// clone into every request handler.
#[derive(Clone)]
pub struct TokenService {
    access_encoding: EncodingKey,
    access_decoding: DecodingKey,
    refresh_encoding: EncodingKey,
    refresh_decoding: DecodingKey,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl TokenService {
    /// Token Service 생성 (설정에서 비밀키/만료 시간 주입)
    /// Secrets and expiries come from startup configuration, never from
    /// ambient environment reads.
    pub fn new(config: &JwtConfig) -> Self {
        Self {
            access_encoding: EncodingKey::from_secret(config.access_secret.as_ref()),
            access_decoding: DecodingKey::from_secret(config.access_secret.as_ref()),
            refresh_encoding: EncodingKey::from_secret(config.refresh_secret.as_ref()),
            refresh_decoding: DecodingKey::from_secret(config.refresh_secret.as_ref()),
            access_ttl: Duration::minutes(config.access_expiry_minutes),
            refresh_ttl: Duration::days(config.refresh_expiry_days),
        }
    }

    pub fn refresh_ttl(&self) -> Duration {
        self.refresh_ttl
    }

    /// 토큰 쌍 발급 (Access + Refresh)
    /// Issue an access/refresh pair with claims {sub, role}
    pub fn issue_token_pair(&self, user_id: u64, role: Role) -> Result<(String, String), ApiError> {
        let access_claims = Claims::new(user_id, role, self.access_ttl);
        let access = encode(&Header::default(), &access_claims, &self.access_encoding)
            .map_err(|e| ApiError::Internal(format!("Failed to sign access token: {}", e)))?;

        let refresh_claims = Claims::new(user_id, role, self.refresh_ttl);
        let refresh = encode(&Header::default(), &refresh_claims, &self.refresh_encoding)
            .map_err(|e| ApiError::Internal(format!("Failed to sign refresh token: {}", e)))?;

        Ok((access, refresh))
    }

    /// Access Token 검증
    /// Verify Access Token
    pub fn verify_access_token(&self, token: &str) -> Result<Claims, ApiError> {
        Self::verify(token, &self.access_decoding)
    }

    /// Refresh Token 검증 (서명/만료만; 저장소 대조는 AuthService에서)
    /// Verify Refresh Token (signature/expiry only; the stored-hash check
    /// happens in AuthService)
    pub fn verify_refresh_token(&self, token: &str) -> Result<Claims, ApiError> {
        Self::verify(token, &self.refresh_decoding)
    }

    fn verify(token: &str, key: &DecodingKey) -> Result<Claims, ApiError> {
        let mut validation = Validation::default();
        // Expiry is exact; the default 60s leeway would keep a just-expired
        // token alive.
        validation.leeway = 0;

        let token_data = decode::<Claims>(token, key, &validation).map_err(|e| match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => ApiError::TokenExpired,
            _ => ApiError::InvalidToken,
        })?;

        Ok(token_data.claims)
    }

    /// 일회용 토큰 생성 (비밀번호 재설정/이메일 인증용 랜덤 문자열)
    /// Generate one-time token (random string for reset/verify flows)
    pub fn generate_one_time_token(&self) -> String {
        rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(64)
            .map(char::from)
            .collect()
    }

    /// 토큰 해싱 (DB 저장용)
    /// Hash a token for database storage
    pub fn hash_token(&self, token: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(token.as_bytes());
        format!("{:x}", hasher.finalize())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> JwtConfig {
        JwtConfig {
            access_secret: "access-secret-for-tests".to_string(),
            refresh_secret: "refresh-secret-for-tests".to_string(),
            access_expiry_minutes: 15,
            refresh_expiry_days: 7,
        }
    }

    #[test]
    fn issued_pair_verifies_and_decodes_same_subject() {
        let service = TokenService::new(&test_config());
        let (access, refresh) = service.issue_token_pair(42, Role::Manager).unwrap();

        let access_claims = service.verify_access_token(&access).unwrap();
        let refresh_claims = service.verify_refresh_token(&refresh).unwrap();

        assert_eq!(access_claims.sub, 42);
        assert_eq!(refresh_claims.sub, 42);
        assert_eq!(access_claims.role, Role::Manager);
        assert!(refresh_claims.exp > access_claims.exp);
    }

    #[test]
    fn back_to_back_pairs_for_same_user_are_distinct() {
        // iat/exp는 초 단위: jti 없이는 같은 초에 발급된 쌍이 동일해져
        // 저장된 해시(UNIQUE)와 충돌한다
        let service = TokenService::new(&test_config());
        let (_, first) = service.issue_token_pair(42, Role::Employee).unwrap();
        let (_, second) = service.issue_token_pair(42, Role::Employee).unwrap();

        assert_ne!(first, second);
        assert_ne!(service.hash_token(&first), service.hash_token(&second));
    }

    #[test]
    fn tokens_are_not_interchangeable_across_secrets() {
        // 서로 다른 비밀키: access 토큰을 refresh로 쓸 수 없음
        let service = TokenService::new(&test_config());
        let (access, refresh) = service.issue_token_pair(7, Role::Employee).unwrap();

        assert!(matches!(
            service.verify_refresh_token(&access),
            Err(ApiError::InvalidToken)
        ));
        assert!(matches!(
            service.verify_access_token(&refresh),
            Err(ApiError::InvalidToken)
        ));
    }

    #[test]
    fn elapsed_expiry_fails_even_with_valid_signature() {
        let mut config = test_config();
        config.access_expiry_minutes = -5; // already expired at issuance
        let service = TokenService::new(&config);

        let (access, _) = service.issue_token_pair(1, Role::Admin).unwrap();
        assert!(matches!(
            service.verify_access_token(&access),
            Err(ApiError::TokenExpired)
        ));
    }

    #[test]
    fn garbage_token_is_invalid_not_expired() {
        let service = TokenService::new(&test_config());
        assert!(matches!(
            service.verify_access_token("not-a-jwt"),
            Err(ApiError::InvalidToken)
        ));
    }

    #[test]
    fn one_time_tokens_are_random_and_hash_deterministically() {
        let service = TokenService::new(&test_config());
        let a = service.generate_one_time_token();
        let b = service.generate_one_time_token();
        assert_eq!(a.len(), 64);
        assert_ne!(a, b);
        assert_eq!(service.hash_token(&a), service.hash_token(&a));
        assert_ne!(service.hash_token(&a), service.hash_token(&b));
    }
}
