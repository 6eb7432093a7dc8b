use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::sync::OnceLock;
use thiserror::Error;

/// API error taxonomy
/// API 에러 분류 (미들웨어/핸들러 공통)
///
/// Authentication errors short-circuit in the extractor layer; validation
/// and not-found errors are decided in services; database errors are
/// classified at the repository boundary via [`ApiError::db`].
#[derive(Error, Debug)]
pub enum ApiError {
    /// Authorization 헤더 없음 또는 형식 오류
    /// Missing or malformed Authorization header
    #[error("Authentication required")]
    Unauthenticated,

    /// 서명이 잘못된 토큰
    /// Malformed token or bad signature
    #[error("Invalid token")]
    InvalidToken,

    /// 만료된 토큰 (서명은 유효)
    /// Expired token (signature may still be valid)
    #[error("Token expired")]
    TokenExpired,

    /// 권한 부족 (역할 불일치)
    /// Role not in the route's allow-list
    #[error("You do not have permission to perform this action")]
    Forbidden,

    /// 잘못된 이메일 또는 비밀번호
    /// Invalid email or password
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// 엔티티를 찾을 수 없음
    /// Entity not found
    #[error("{entity} not found")]
    NotFound { entity: &'static str },

    /// 유효성 검증 실패
    /// Field-level validation failures
    #[error("Validation error")]
    Validation { errors: Vec<String> },

    /// 고유 필드 중복 (이메일, 부서명 등)
    /// Duplicate unique field (email, department name, ...)
    #[error("{0}")]
    Conflict(String),

    /// 데이터베이스 에러
    /// Database error
    #[error("Database error: {0}")]
    Database(String),

    /// 내부 서버 에러
    /// Internal server error
    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Whether 500 responses include internal detail.
/// Set once at startup from the environment (development only).
static EXPOSE_DETAIL: OnceLock<bool> = OnceLock::new();

impl ApiError {
    /// Configure error detail exposure (call once from main)
    /// 에러 상세 노출 설정 (main에서 한 번 호출)
    pub fn set_expose_detail(expose: bool) {
        let _ = EXPOSE_DETAIL.set(expose);
    }

    fn expose_detail() -> bool {
        *EXPOSE_DETAIL.get().unwrap_or(&false)
    }

    /// Classify a database error at the collaborator boundary
    /// 데이터베이스 에러를 경계에서 분류 (NotFound / Conflict / Database)
    pub fn db(entity: &'static str, err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::RowNotFound => ApiError::NotFound { entity },
            sqlx::Error::Database(db_err) => {
                // 23505 = PostgreSQL unique_violation
                if db_err.code().as_deref() == Some("23505") {
                    ApiError::Conflict(format!("{} with this unique field already exists", entity))
                } else {
                    ApiError::Database(err.to_string())
                }
            }
            _ => ApiError::Database(err.to_string()),
        }
    }

    pub fn validation(errors: Vec<String>) -> Self {
        ApiError::Validation { errors }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Unauthenticated
            | ApiError::InvalidToken
            | ApiError::TokenExpired
            | ApiError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden => StatusCode::FORBIDDEN,
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Validation { .. } | ApiError::Conflict(_) => StatusCode::BAD_REQUEST,
            ApiError::Database(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// ApiError를 표준 응답 envelope으로 변환
/// {success: false, message, errors?/error?}
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        let body = match &self {
            ApiError::Validation { errors } => json!({
                "success": false,
                "message": "Validation error",
                "errors": errors,
            }),
            ApiError::Database(detail) | ApiError::Internal(detail) => {
                tracing::error!(%status, %detail, "request failed with server error");
                if Self::expose_detail() {
                    json!({
                        "success": false,
                        "message": "Server error",
                        "error": detail,
                    })
                } else {
                    json!({
                        "success": false,
                        "message": "Server error",
                    })
                }
            }
            _ => json!({
                "success": false,
                "message": self.to_string(),
            }),
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_errors_map_to_401() {
        assert_eq!(ApiError::Unauthenticated.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(ApiError::InvalidToken.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(ApiError::TokenExpired.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            ApiError::InvalidCredentials.status(),
            StatusCode::UNAUTHORIZED
        );
    }

    #[test]
    fn forbidden_is_403_not_404() {
        assert_eq!(ApiError::Forbidden.status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn duplicate_and_validation_map_to_400() {
        let conflict = ApiError::Conflict("User with this email already exists".into());
        assert_eq!(conflict.status(), StatusCode::BAD_REQUEST);
        let validation = ApiError::validation(vec!["email is required".into()]);
        assert_eq!(validation.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn row_not_found_becomes_not_found() {
        let err = ApiError::db("User", sqlx::Error::RowNotFound);
        assert!(matches!(err, ApiError::NotFound { entity: "User" }));
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }
}
