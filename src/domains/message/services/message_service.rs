use crate::domains::message::models::{Message, SendMessageRequest};
use crate::shared::database::{Database, MessageRepository, UserRepository};
use crate::shared::errors::ApiError;
use crate::shared::utils::pagination::PageParams;

// 메시지 서비스
// Internal messaging between employees. Only sender and recipient can
// see a message; only the recipient can mark it read.
#[derive(Clone)]
pub struct MessageService {
    db: Database,
}

impl MessageService {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// 수신함 조회
    pub async fn inbox(
        &self,
        user_id: u64,
        params: &PageParams,
    ) -> Result<(Vec<Message>, i64), ApiError> {
        let repo = MessageRepository::new(self.db.pool().clone());
        let messages = repo
            .inbox(user_id, params.limit(), params.offset())
            .await
            .map_err(|e| ApiError::db("Message", e))?;
        let total = repo
            .inbox_count(user_id)
            .await
            .map_err(|e| ApiError::db("Message", e))?;

        Ok((messages, total))
    }

    /// 메시지 단건 조회 (참여자만)
    pub async fn get_message(&self, id: u64, user_id: u64) -> Result<Message, ApiError> {
        let message = self.find_participant_message(id, user_id).await?;
        Ok(message)
    }

    pub async fn send_message(
        &self,
        sender_id: u64,
        request: SendMessageRequest,
    ) -> Result<Message, ApiError> {
        if request.body.trim().is_empty() {
            return Err(ApiError::validation(vec!["body is required".to_string()]));
        }
        if request.recipient_id == sender_id {
            return Err(ApiError::validation(vec![
                "cannot send a message to yourself".to_string(),
            ]));
        }

        // 수신자 존재 확인
        let user_repo = UserRepository::new(self.db.pool().clone());
        user_repo
            .find_by_id(request.recipient_id)
            .await
            .map_err(|e| ApiError::db("User", e))?
            .ok_or(ApiError::NotFound { entity: "User" })?;

        let repo = MessageRepository::new(self.db.pool().clone());
        repo.create(
            sender_id,
            request.recipient_id,
            request.subject.as_deref(),
            request.body.trim(),
        )
        .await
        .map_err(|e| ApiError::db("Message", e))
    }

    /// 읽음 처리 (수신자만)
    pub async fn mark_read(&self, id: u64, user_id: u64) -> Result<Message, ApiError> {
        let message = self.find_participant_message(id, user_id).await?;

        if message.recipient_id != user_id {
            return Err(ApiError::Forbidden);
        }

        let repo = MessageRepository::new(self.db.pool().clone());
        repo.mark_read(id)
            .await
            .map_err(|e| ApiError::db("Message", e))?
            .ok_or(ApiError::NotFound { entity: "Message" })
    }

    /// 메시지 삭제 (참여자만)
    pub async fn delete_message(&self, id: u64, user_id: u64) -> Result<(), ApiError> {
        self.find_participant_message(id, user_id).await?;

        let repo = MessageRepository::new(self.db.pool().clone());
        let deleted = repo.delete(id).await.map_err(|e| ApiError::db("Message", e))?;

        if deleted == 0 {
            return Err(ApiError::NotFound { entity: "Message" });
        }
        Ok(())
    }

    /// 상대방과의 대화 내역 (양방향)
    pub async fn conversation(
        &self,
        user_id: u64,
        other_id: u64,
        params: &PageParams,
    ) -> Result<(Vec<Message>, i64), ApiError> {
        let user_repo = UserRepository::new(self.db.pool().clone());
        user_repo
            .find_by_id(other_id)
            .await
            .map_err(|e| ApiError::db("User", e))?
            .ok_or(ApiError::NotFound { entity: "User" })?;

        let repo = MessageRepository::new(self.db.pool().clone());
        let messages = repo
            .conversation(user_id, other_id, params.limit(), params.offset())
            .await
            .map_err(|e| ApiError::db("Message", e))?;
        let total = repo
            .conversation_count(user_id, other_id)
            .await
            .map_err(|e| ApiError::db("Message", e))?;

        Ok((messages, total))
    }

    pub async fn unread_count(&self, user_id: u64) -> Result<i64, ApiError> {
        let repo = MessageRepository::new(self.db.pool().clone());
        repo.unread_count(user_id)
            .await
            .map_err(|e| ApiError::db("Message", e))
    }

    // 참여자 확인: 발신자도 수신자도 아니면 403
    async fn find_participant_message(
        &self,
        id: u64,
        user_id: u64,
    ) -> Result<Message, ApiError> {
        let repo = MessageRepository::new(self.db.pool().clone());
        let message = repo
            .find_by_id(id)
            .await
            .map_err(|e| ApiError::db("Message", e))?
            .ok_or(ApiError::NotFound { entity: "Message" })?;

        if message.sender_id != user_id && message.recipient_id != user_id {
            return Err(ApiError::Forbidden);
        }
        Ok(message)
    }
}
