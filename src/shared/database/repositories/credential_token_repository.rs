use chrono::{DateTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use crate::domains::auth::models::credential_token::{CredentialTokenRecord, TokenPurpose};

/// One-time credential token repository
/// 일회용 토큰 저장소 (비밀번호 재설정 / 이메일 인증)
pub struct CredentialTokenRepository {
    pool: PgPool,
}

impl CredentialTokenRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        user_id: u64,
        token_hash: &str,
        purpose: TokenPurpose,
        expires_at: DateTime<Utc>,
    ) -> Result<CredentialTokenRecord, sqlx::Error> {
        let row = sqlx::query(
            r#"
            INSERT INTO credential_tokens (user_id, token_hash, purpose, expires_at, created_at)
            VALUES ($1, $2, $3, $4, NOW())
            RETURNING id, user_id, token_hash, purpose, expires_at, consumed_at, created_at
            "#,
        )
        .bind(user_id as i64)
        .bind(token_hash)
        .bind(purpose.as_str())
        .bind(expires_at)
        .fetch_one(&self.pool)
        .await?;

        map_record(&row)
    }

    pub async fn find_by_token_hash(
        &self,
        token_hash: &str,
        purpose: TokenPurpose,
    ) -> Result<Option<CredentialTokenRecord>, sqlx::Error> {
        let row = sqlx::query(
            r#"
            SELECT id, user_id, token_hash, purpose, expires_at, consumed_at, created_at
            FROM credential_tokens
            WHERE token_hash = $1 AND purpose = $2
            "#,
        )
        .bind(token_hash)
        .bind(purpose.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(map_record).transpose()
    }

    /// 토큰 사용 처리 (1회 사용)
    /// Mark a token as consumed (single use)
    pub async fn consume(&self, id: i64) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE credential_tokens SET consumed_at = NOW() WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

fn map_record(row: &PgRow) -> Result<CredentialTokenRecord, sqlx::Error> {
    let purpose: String = row.try_get("purpose")?;

    Ok(CredentialTokenRecord {
        id: row.try_get("id")?,
        user_id: row.try_get("user_id")?,
        token_hash: row.try_get("token_hash")?,
        purpose: purpose
            .parse()
            .map_err(|e| sqlx::Error::Decode(Box::new(e)))?,
        expires_at: row.try_get("expires_at")?,
        consumed_at: row.try_get("consumed_at")?,
        created_at: row.try_get("created_at")?,
    })
}
