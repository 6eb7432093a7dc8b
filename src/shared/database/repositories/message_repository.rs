use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use crate::domains::message::models::Message;

const MESSAGE_COLUMNS: &str =
    "id, sender_id, recipient_id, subject, body, read, created_at, updated_at";

pub struct MessageRepository {
    pool: PgPool,
}

impl MessageRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        sender_id: u64,
        recipient_id: u64,
        subject: Option<&str>,
        body: &str,
    ) -> Result<Message, sqlx::Error> {
        let row = sqlx::query(&format!(
            r#"
            INSERT INTO messages (sender_id, recipient_id, subject, body, read, created_at, updated_at)
            VALUES ($1, $2, $3, $4, FALSE, NOW(), NOW())
            RETURNING {MESSAGE_COLUMNS}
            "#
        ))
        .bind(sender_id as i64)
        .bind(recipient_id as i64)
        .bind(subject)
        .bind(body)
        .fetch_one(&self.pool)
        .await?;

        map_message(&row)
    }

    pub async fn find_by_id(&self, id: u64) -> Result<Option<Message>, sqlx::Error> {
        let row = sqlx::query(&format!(
            "SELECT {MESSAGE_COLUMNS} FROM messages WHERE id = $1"
        ))
        .bind(id as i64)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(map_message).transpose()
    }

    /// 수신함 (최신순, 페이지네이션)
    /// Inbox for a user, newest first
    pub async fn inbox(
        &self,
        recipient_id: u64,
        limit: u32,
        offset: i64,
    ) -> Result<Vec<Message>, sqlx::Error> {
        let rows = sqlx::query(&format!(
            r#"
            SELECT {MESSAGE_COLUMNS} FROM messages
            WHERE recipient_id = $1
            ORDER BY created_at DESC
            LIMIT $2 OFFSET $3
            "#
        ))
        .bind(recipient_id as i64)
        .bind(i64::from(limit))
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(map_message).collect()
    }

    pub async fn inbox_count(&self, recipient_id: u64) -> Result<i64, sqlx::Error> {
        let row = sqlx::query("SELECT COUNT(*) FROM messages WHERE recipient_id = $1")
            .bind(recipient_id as i64)
            .fetch_one(&self.pool)
            .await?;
        row.try_get(0)
    }

    /// 두 사용자 간 대화 (양방향, 최신순)
    /// Conversation between two users, both directions
    pub async fn conversation(
        &self,
        user_a: u64,
        user_b: u64,
        limit: u32,
        offset: i64,
    ) -> Result<Vec<Message>, sqlx::Error> {
        let rows = sqlx::query(&format!(
            r#"
            SELECT {MESSAGE_COLUMNS} FROM messages
            WHERE (sender_id = $1 AND recipient_id = $2)
               OR (sender_id = $2 AND recipient_id = $1)
            ORDER BY created_at DESC
            LIMIT $3 OFFSET $4
            "#
        ))
        .bind(user_a as i64)
        .bind(user_b as i64)
        .bind(i64::from(limit))
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(map_message).collect()
    }

    pub async fn conversation_count(&self, user_a: u64, user_b: u64) -> Result<i64, sqlx::Error> {
        let row = sqlx::query(
            r#"
            SELECT COUNT(*) FROM messages
            WHERE (sender_id = $1 AND recipient_id = $2)
               OR (sender_id = $2 AND recipient_id = $1)
            "#,
        )
        .bind(user_a as i64)
        .bind(user_b as i64)
        .fetch_one(&self.pool)
        .await?;
        row.try_get(0)
    }

    pub async fn mark_read(&self, id: u64) -> Result<Option<Message>, sqlx::Error> {
        let row = sqlx::query(&format!(
            r#"
            UPDATE messages SET read = TRUE, updated_at = NOW()
            WHERE id = $1
            RETURNING {MESSAGE_COLUMNS}
            "#
        ))
        .bind(id as i64)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(map_message).transpose()
    }

    pub async fn delete(&self, id: u64) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM messages WHERE id = $1")
            .bind(id as i64)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    pub async fn unread_count(&self, recipient_id: u64) -> Result<i64, sqlx::Error> {
        let row =
            sqlx::query("SELECT COUNT(*) FROM messages WHERE recipient_id = $1 AND read = FALSE")
                .bind(recipient_id as i64)
                .fetch_one(&self.pool)
                .await?;
        row.try_get(0)
    }
}

fn map_message(row: &PgRow) -> Result<Message, sqlx::Error> {
    Ok(Message {
        id: row.try_get::<i64, _>("id")? as u64,
        sender_id: row.try_get::<i64, _>("sender_id")? as u64,
        recipient_id: row.try_get::<i64, _>("recipient_id")? as u64,
        subject: row.try_get("subject")?,
        body: row.try_get("body")?,
        read: row.try_get("read")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}
