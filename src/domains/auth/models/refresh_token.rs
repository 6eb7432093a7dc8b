use chrono::{DateTime, Utc};

/// Stored refresh token record
/// Refresh Token 모델 (DB에는 해시만 저장)
#[derive(Debug, Clone)]
pub struct RefreshTokenRecord {
    pub id: i64,
    pub user_id: i64,
    pub token_hash: String,
    pub expires_at: DateTime<Utc>,
    pub revoked: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Refresh Token 생성 요청 (새 토큰 발급 시)
#[derive(Debug)]
pub struct RefreshTokenCreate {
    pub user_id: u64,
    pub token_hash: String,
    pub expires_at: DateTime<Utc>,
}
