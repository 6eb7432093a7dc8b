use serde_json::json;

use crate::client::api_client::ApiClient;
use crate::client::error::ClientError;
use crate::domains::message::models::{Message, SendMessageRequest, UnreadCount};
use crate::shared::models::{ApiResponse, ListResponse};

/// Message endpoints (메시지 API)
impl ApiClient {
    /// 수신함 (최신순)
    pub async fn inbox(&self, page: u32, limit: u32) -> Result<ListResponse<Message>, ClientError> {
        self.get_query("/messages", &json!({ "page": page, "limit": limit }))
            .await
    }

    pub async fn message(&self, id: u64) -> Result<ApiResponse<Message>, ClientError> {
        self.get(&format!("/messages/{id}")).await
    }

    pub async fn send_message(
        &self,
        request: &SendMessageRequest,
    ) -> Result<ApiResponse<Message>, ClientError> {
        self.post("/messages", request).await
    }

    pub async fn mark_message_read(&self, id: u64) -> Result<ApiResponse<Message>, ClientError> {
        self.patch_empty(&format!("/messages/{id}/read")).await
    }

    pub async fn delete_message(&self, id: u64) -> Result<ApiResponse<()>, ClientError> {
        self.delete(&format!("/messages/{id}")).await
    }

    pub async fn conversation(
        &self,
        user_id: u64,
        page: u32,
        limit: u32,
    ) -> Result<ListResponse<Message>, ClientError> {
        self.get_query(
            &format!("/messages/conversation/{user_id}"),
            &json!({ "page": page, "limit": limit }),
        )
        .await
    }

    pub async fn unread_count(&self) -> Result<ApiResponse<UnreadCount>, ClientError> {
        self.get("/messages/unread/count").await
    }
}
