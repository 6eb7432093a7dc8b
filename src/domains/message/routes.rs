// Message domain routes
use axum::{
    routing::{get, patch},
    Router,
};

use crate::domains::message::handlers::message_handler;
use crate::shared::services::AppState;

/// 메시지 라우터 생성
/// "/unread/count" and "/:id" coexist: axum matches static segments first.
pub fn create_message_router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(message_handler::inbox).post(message_handler::send_message),
        )
        .route(
            "/:id",
            get(message_handler::get_message).delete(message_handler::delete_message),
        )
        .route("/:id/read", patch(message_handler::mark_read))
        .route("/conversation/:user_id", get(message_handler::conversation))
        .route("/unread/count", get(message_handler::unread_count))
}
