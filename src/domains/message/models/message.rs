use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Message model (사내 메시지)
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: u64,
    pub sender_id: u64,
    pub recipient_id: u64,
    pub subject: Option<String>,
    pub body: String,
    pub read: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// 메시지 전송 요청
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageRequest {
    pub recipient_id: u64,
    pub subject: Option<String>,
    #[schema(example = "Meeting moved to 3pm")]
    pub body: String,
}

/// 읽지 않은 메시지 수
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UnreadCount {
    pub unread: i64,
}
