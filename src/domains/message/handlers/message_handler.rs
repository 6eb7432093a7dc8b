use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::domains::message::models::{Message, SendMessageRequest, UnreadCount};
use crate::shared::errors::ApiError;
use crate::shared::middleware::auth::AuthenticatedUser;
use crate::shared::models::{ApiResponse, ListResponse};
use crate::shared::services::AppState;
use crate::shared::utils::pagination::PageParams;

/// 수신함 핸들러
#[utoipa::path(
    get,
    path = "/api/v1/messages",
    params(PageParams),
    responses(
        (status = 200, description = "Inbox, newest first", body = [Message]),
        (status = 401, description = "Unauthorized")
    ),
    security(("BearerAuth" = [])),
    tag = "Messages"
)]
pub async fn inbox(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Query(params): Query<PageParams>,
) -> Result<Json<ListResponse<Message>>, ApiError> {
    let (messages, total) = app_state
        .message_state
        .message_service
        .inbox(user.user_id, &params)
        .await?;

    Ok(Json(ListResponse::new(messages, total, &params)))
}

/// 메시지 단건 조회 핸들러
#[utoipa::path(
    get,
    path = "/api/v1/messages/{id}",
    params(("id" = u64, Path, description = "Message ID")),
    responses(
        (status = 200, description = "Message detail", body = Message),
        (status = 403, description = "Not a participant"),
        (status = 404, description = "Message not found")
    ),
    security(("BearerAuth" = [])),
    tag = "Messages"
)]
pub async fn get_message(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<u64>,
) -> Result<Json<ApiResponse<Message>>, ApiError> {
    let message = app_state
        .message_state
        .message_service
        .get_message(id, user.user_id)
        .await?;

    Ok(Json(ApiResponse::data(message)))
}

/// 메시지 전송 핸들러
#[utoipa::path(
    post,
    path = "/api/v1/messages",
    request_body = SendMessageRequest,
    responses(
        (status = 201, description = "Message sent", body = Message),
        (status = 400, description = "Validation failed"),
        (status = 404, description = "Recipient not found")
    ),
    security(("BearerAuth" = [])),
    tag = "Messages"
)]
pub async fn send_message(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Json(request): Json<SendMessageRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Message>>), ApiError> {
    let message = app_state
        .message_state
        .message_service
        .send_message(user.user_id, request)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message("Message sent successfully", message)),
    ))
}

/// 읽음 처리 핸들러 (수신자만)
#[utoipa::path(
    patch,
    path = "/api/v1/messages/{id}/read",
    params(("id" = u64, Path, description = "Message ID")),
    responses(
        (status = 200, description = "Message marked as read", body = Message),
        (status = 403, description = "Only the recipient can mark a message read"),
        (status = 404, description = "Message not found")
    ),
    security(("BearerAuth" = [])),
    tag = "Messages"
)]
pub async fn mark_read(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<u64>,
) -> Result<Json<ApiResponse<Message>>, ApiError> {
    let message = app_state
        .message_state
        .message_service
        .mark_read(id, user.user_id)
        .await?;

    Ok(Json(ApiResponse::with_message(
        "Message marked as read",
        message,
    )))
}

/// 메시지 삭제 핸들러 (참여자만)
#[utoipa::path(
    delete,
    path = "/api/v1/messages/{id}",
    params(("id" = u64, Path, description = "Message ID")),
    responses(
        (status = 200, description = "Message deleted"),
        (status = 403, description = "Not a participant"),
        (status = 404, description = "Message not found")
    ),
    security(("BearerAuth" = [])),
    tag = "Messages"
)]
pub async fn delete_message(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<u64>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    app_state
        .message_state
        .message_service
        .delete_message(id, user.user_id)
        .await?;

    Ok(Json(ApiResponse::message("Message deleted successfully")))
}

/// 대화 내역 핸들러
#[utoipa::path(
    get,
    path = "/api/v1/messages/conversation/{userId}",
    params(
        ("userId" = u64, Path, description = "Other participant's user ID"),
        PageParams
    ),
    responses(
        (status = 200, description = "Conversation with another user", body = [Message]),
        (status = 404, description = "User not found")
    ),
    security(("BearerAuth" = [])),
    tag = "Messages"
)]
pub async fn conversation(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(other_id): Path<u64>,
    Query(params): Query<PageParams>,
) -> Result<Json<ListResponse<Message>>, ApiError> {
    let (messages, total) = app_state
        .message_state
        .message_service
        .conversation(user.user_id, other_id, &params)
        .await?;

    Ok(Json(ListResponse::new(messages, total, &params)))
}

/// 안읽은 메시지 수 핸들러
#[utoipa::path(
    get,
    path = "/api/v1/messages/unread/count",
    responses(
        (status = 200, description = "Unread message count", body = UnreadCount),
        (status = 401, description = "Unauthorized")
    ),
    security(("BearerAuth" = [])),
    tag = "Messages"
)]
pub async fn unread_count(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<Json<ApiResponse<UnreadCount>>, ApiError> {
    let unread = app_state
        .message_state
        .message_service
        .unread_count(user.user_id)
        .await?;

    Ok(Json(ApiResponse::data(UnreadCount { unread })))
}
