use chrono::{DateTime, Utc};
use std::fmt;
use std::str::FromStr;

use crate::domains::auth::models::user::EnumParseError;

/// Purpose of a one-time credential token
/// 일회용 토큰 용도 (비밀번호 재설정 / 이메일 인증)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenPurpose {
    PasswordReset,
    EmailVerify,
}

impl TokenPurpose {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenPurpose::PasswordReset => "password_reset",
            TokenPurpose::EmailVerify => "email_verify",
        }
    }
}

impl fmt::Display for TokenPurpose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TokenPurpose {
    type Err = EnumParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "password_reset" => Ok(TokenPurpose::PasswordReset),
            "email_verify" => Ok(TokenPurpose::EmailVerify),
            other => Err(EnumParseError::new("purpose", other)),
        }
    }
}

/// Stored one-time token (해시만 저장, 1회 사용)
#[derive(Debug, Clone)]
pub struct CredentialTokenRecord {
    pub id: i64,
    pub user_id: i64,
    pub token_hash: String,
    pub purpose: TokenPurpose,
    pub expires_at: DateTime<Utc>,
    pub consumed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl CredentialTokenRecord {
    /// 아직 사용 가능한 토큰인지 (미사용 + 미만료)
    pub fn is_usable(&self) -> bool {
        self.consumed_at.is_none() && self.expires_at > Utc::now()
    }
}
