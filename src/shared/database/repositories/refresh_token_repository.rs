use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use crate::domains::auth::models::refresh_token::{RefreshTokenCreate, RefreshTokenRecord};

/// Refresh Token Repository
/// Refresh Token 데이터베이스 작업 처리 (회전/무효화 추적)
pub struct RefreshTokenRepository {
    pool: PgPool,
}

impl RefreshTokenRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Refresh Token 저장 (해시만)
    /// Store a refresh token hash
    pub async fn create(&self, data: RefreshTokenCreate) -> Result<RefreshTokenRecord, sqlx::Error> {
        let row = sqlx::query(
            r#"
            INSERT INTO refresh_tokens (user_id, token_hash, expires_at, revoked, created_at, updated_at)
            VALUES ($1, $2, $3, FALSE, NOW(), NOW())
            RETURNING id, user_id, token_hash, expires_at, revoked, created_at, updated_at
            "#,
        )
        .bind(data.user_id as i64)
        .bind(&data.token_hash)
        .bind(data.expires_at)
        .fetch_one(&self.pool)
        .await?;

        map_record(&row)
    }

    /// Refresh Token 조회 (token_hash로)
    /// Find refresh token by its hash
    pub async fn find_by_token_hash(
        &self,
        token_hash: &str,
    ) -> Result<Option<RefreshTokenRecord>, sqlx::Error> {
        let row = sqlx::query(
            r#"
            SELECT id, user_id, token_hash, expires_at, revoked, created_at, updated_at
            FROM refresh_tokens
            WHERE token_hash = $1
            "#,
        )
        .bind(token_hash)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(map_record).transpose()
    }

    /// Refresh Token 무효화 (revoked = true)
    /// Revoke a single refresh token
    pub async fn revoke(&self, token_hash: &str) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE refresh_tokens SET revoked = TRUE, updated_at = NOW() WHERE token_hash = $1",
        )
        .bind(token_hash)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// 사용자의 모든 Refresh Token 무효화 (재로그인/전체 로그아웃 시)
    /// Revoke all refresh tokens for a user
    pub async fn revoke_all_for_user(&self, user_id: u64) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE refresh_tokens SET revoked = TRUE, updated_at = NOW() \
             WHERE user_id = $1 AND revoked = FALSE",
        )
        .bind(user_id as i64)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// 만료된 토큰 삭제 (정리 작업)
    /// Delete expired tokens (cleanup)
    pub async fn delete_expired(&self) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM refresh_tokens WHERE expires_at < NOW()")
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}

fn map_record(row: &PgRow) -> Result<RefreshTokenRecord, sqlx::Error> {
    Ok(RefreshTokenRecord {
        id: row.try_get("id")?,
        user_id: row.try_get("user_id")?,
        token_hash: row.try_get("token_hash")?,
        expires_at: row.try_get("expires_at")?,
        revoked: row.try_get("revoked")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}
