use thiserror::Error;

/// API client errors (API 클라이언트 오류)
#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport-level failure (connect, timeout, body read)
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// Refresh failed or no tokens stored; the caller must log in again.
    /// 세션 만료: 다시 로그인 필요
    #[error("session expired, login required")]
    SessionExpired,

    /// Server answered with a non-success envelope
    #[error("api error ({status}): {message}")]
    Api { status: u16, message: String },
}
