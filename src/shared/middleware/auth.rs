use axum::{async_trait, extract::FromRequestParts, http::request::Parts};

use crate::domains::auth::models::user::Role;
use crate::shared::errors::ApiError;
use crate::shared::services::AppState;

/// 인증된 사용자 정보 (JWT 토큰에서 추출)
/// Authenticated identity (extracted from the access token)
#[derive(Debug, Clone, Copy)]
pub struct AuthenticatedUser {
    pub user_id: u64,
    pub role: Role,
}

/// AuthenticatedUser를 Axum Extractor로 구현
///
/// Per-request state machine: Unauthenticated → TokenPresent → Verified.
/// Rejections (missing header, bad signature, elapsed expiry) short-circuit
/// with 401 before any business logic runs.
///
/// 사용법:
/// ```ignore
/// pub async fn get_me(
///     State(app_state): State<AppState>,
///     user: AuthenticatedUser,
/// ) -> Result<...> {
///     let user_id = user.user_id;
///     // ...
/// }
/// ```
#[async_trait]
impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        // 1. Authorization 헤더에서 토큰 추출
        let auth_header = parts
            .headers
            .get("Authorization")
            .ok_or(ApiError::Unauthenticated)?
            .to_str()
            .map_err(|_| ApiError::Unauthenticated)?;

        // 2. "Bearer <token>" 형식 파싱
        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or(ApiError::Unauthenticated)?;

        // 3. Token Service로 검증 (서명 + 만료)
        let claims = state.auth_state.token_service.verify_access_token(token)?;

        // 4. 식별 정보를 요청에 부착
        Ok(AuthenticatedUser {
            user_id: claims.sub,
            role: claims.role,
        })
    }
}

/// 관리자 전용 라우트 가드 (role = admin)
/// Admin-only route guard; wrong role rejects with 403, never 404/500.
#[derive(Debug, Clone, Copy)]
pub struct RequireAdmin(pub AuthenticatedUser);

#[async_trait]
impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthenticatedUser::from_request_parts(parts, state).await?;

        if user.role != Role::Admin {
            return Err(ApiError::Forbidden);
        }

        Ok(RequireAdmin(user))
    }
}

/// 관리 권한 라우트 가드 (role ∈ {admin, manager})
/// Manager-level route guard (admin or manager)
#[derive(Debug, Clone, Copy)]
pub struct RequireManager(pub AuthenticatedUser);

#[async_trait]
impl FromRequestParts<AppState> for RequireManager {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthenticatedUser::from_request_parts(parts, state).await?;

        if !user.role.is_manager() {
            return Err(ApiError::Forbidden);
        }

        Ok(RequireManager(user))
    }
}
