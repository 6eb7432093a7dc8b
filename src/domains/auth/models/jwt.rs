use chrono::{Duration, Utc};
use rand::distributions::Alphanumeric;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::domains::auth::models::user::Role;

/// JWT Claims (토큰에 포함될 데이터)
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// 사용자 ID
    /// Subject (user ID)
    pub sub: u64,

    /// 역할 (권한 검사용)
    /// Role (used for authorization)
    pub role: Role,

    /// 발급 시간 (Unix timestamp)
    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// 만료 시간 (Unix timestamp)
    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// 토큰 고유 ID (무작위)
    /// Random token id. Timestamps only have second granularity, so without
    /// this a pair rotated within the same second would serialize to the
    /// same signed token and its hash would collide with the row being
    /// revoked.
    pub jti: String,
}

impl Claims {
    /// 새 Claims 생성 (만료 시간 자동 계산)
    /// Create new Claims with computed expiry
    pub fn new(sub: u64, role: Role, ttl: Duration) -> Self {
        let now = Utc::now().timestamp();
        let jti: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(16)
            .map(char::from)
            .collect();

        Self {
            sub,
            role,
            iat: now,
            exp: now + ttl.num_seconds(),
            jti,
        }
    }
}
