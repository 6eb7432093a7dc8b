use chrono::{DateTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Postgres, QueryBuilder, Row};

use crate::domains::task::models::{Task, TaskPriority, TaskStatus};

const TASK_COLUMNS: &str = "id, title, description, status, priority, assigned_to, due_date, \
     created_by, updated_by, created_at, updated_at";

/// New task row
#[derive(Debug)]
pub struct NewTask<'a> {
    pub title: &'a str,
    pub description: Option<&'a str>,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub assigned_to: Option<u64>,
    pub due_date: Option<DateTime<Utc>>,
    pub created_by: u64,
}

/// Partial task update (없는 필드는 기존 값 유지)
#[derive(Debug, Default)]
pub struct TaskChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub priority: Option<TaskPriority>,
    pub due_date: Option<DateTime<Utc>>,
}

/// Task list filter
#[derive(Debug, Default)]
pub struct TaskFilter {
    pub status: Option<TaskStatus>,
    pub priority: Option<TaskPriority>,
    pub assigned_to: Option<u64>,
}

pub struct TaskRepository {
    pool: PgPool,
}

impl TaskRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, task: NewTask<'_>) -> Result<Task, sqlx::Error> {
        let row = sqlx::query(&format!(
            r#"
            INSERT INTO tasks
                (title, description, status, priority, assigned_to, due_date, created_by,
                 created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, NOW(), NOW())
            RETURNING {TASK_COLUMNS}
            "#
        ))
        .bind(task.title)
        .bind(task.description)
        .bind(task.status.as_str())
        .bind(task.priority.as_str())
        .bind(task.assigned_to.map(|v| v as i64))
        .bind(task.due_date)
        .bind(task.created_by as i64)
        .fetch_one(&self.pool)
        .await?;

        map_task(&row)
    }

    pub async fn find_by_id(&self, id: u64) -> Result<Option<Task>, sqlx::Error> {
        let row = sqlx::query(&format!("SELECT {TASK_COLUMNS} FROM tasks WHERE id = $1"))
            .bind(id as i64)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(map_task).transpose()
    }

    pub async fn update(
        &self,
        id: u64,
        changes: TaskChanges,
        updated_by: u64,
    ) -> Result<Option<Task>, sqlx::Error> {
        let row = sqlx::query(&format!(
            r#"
            UPDATE tasks SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                priority = COALESCE($4, priority),
                due_date = COALESCE($5, due_date),
                updated_by = $6,
                updated_at = NOW()
            WHERE id = $1
            RETURNING {TASK_COLUMNS}
            "#
        ))
        .bind(id as i64)
        .bind(changes.title)
        .bind(changes.description)
        .bind(changes.priority.map(|p| p.as_str()))
        .bind(changes.due_date)
        .bind(updated_by as i64)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(map_task).transpose()
    }

    /// 업무 할당 (상태도 함께 변경)
    /// Assign a task and move it to in-progress
    pub async fn assign(
        &self,
        id: u64,
        user_id: u64,
        updated_by: u64,
    ) -> Result<Option<Task>, sqlx::Error> {
        let row = sqlx::query(&format!(
            r#"
            UPDATE tasks SET
                assigned_to = $2,
                status = $3,
                updated_by = $4,
                updated_at = NOW()
            WHERE id = $1
            RETURNING {TASK_COLUMNS}
            "#
        ))
        .bind(id as i64)
        .bind(user_id as i64)
        .bind(TaskStatus::InProgress.as_str())
        .bind(updated_by as i64)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(map_task).transpose()
    }

    pub async fn update_status(
        &self,
        id: u64,
        status: TaskStatus,
        updated_by: u64,
    ) -> Result<Option<Task>, sqlx::Error> {
        let row = sqlx::query(&format!(
            r#"
            UPDATE tasks SET status = $2, updated_by = $3, updated_at = NOW()
            WHERE id = $1
            RETURNING {TASK_COLUMNS}
            "#
        ))
        .bind(id as i64)
        .bind(status.as_str())
        .bind(updated_by as i64)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(map_task).transpose()
    }

    pub async fn delete(&self, id: u64) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id as i64)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    /// 사용자 삭제 시 해당 사용자의 업무를 미할당 상태로 되돌림
    /// Unassign all tasks of a user (used when the user is deleted)
    pub async fn unassign_all_for_user(&self, user_id: u64) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE tasks SET assigned_to = NULL, status = $2, updated_at = NOW() \
             WHERE assigned_to = $1",
        )
        .bind(user_id as i64)
        .bind(TaskStatus::Unassigned.as_str())
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    pub async fn list(
        &self,
        filter: &TaskFilter,
        limit: u32,
        offset: i64,
    ) -> Result<Vec<Task>, sqlx::Error> {
        let mut qb =
            QueryBuilder::<Postgres>::new(format!("SELECT {TASK_COLUMNS} FROM tasks WHERE 1=1"));
        push_task_filter(&mut qb, filter);
        qb.push(" ORDER BY created_at DESC LIMIT ")
            .push_bind(i64::from(limit))
            .push(" OFFSET ")
            .push_bind(offset);

        let rows = qb.build().fetch_all(&self.pool).await?;
        rows.iter().map(map_task).collect()
    }

    pub async fn count(&self, filter: &TaskFilter) -> Result<i64, sqlx::Error> {
        let mut qb = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM tasks WHERE 1=1");
        push_task_filter(&mut qb, filter);

        let row = qb.build().fetch_one(&self.pool).await?;
        row.try_get(0)
    }

    /// 최근 생성 업무 (통계용)
    pub async fn recent(&self, limit: i64) -> Result<Vec<Task>, sqlx::Error> {
        let rows = sqlx::query(&format!(
            "SELECT {TASK_COLUMNS} FROM tasks ORDER BY created_at DESC LIMIT $1"
        ))
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(map_task).collect()
    }

    pub async fn count_all(&self) -> Result<i64, sqlx::Error> {
        let row = sqlx::query("SELECT COUNT(*) FROM tasks")
            .fetch_one(&self.pool)
            .await?;
        row.try_get(0)
    }

    pub async fn count_by_status(&self, status: TaskStatus) -> Result<i64, sqlx::Error> {
        let row = sqlx::query("SELECT COUNT(*) FROM tasks WHERE status = $1")
            .bind(status.as_str())
            .fetch_one(&self.pool)
            .await?;
        row.try_get(0)
    }
}

fn push_task_filter(qb: &mut QueryBuilder<'_, Postgres>, filter: &TaskFilter) {
    if let Some(status) = filter.status {
        qb.push(" AND status = ").push_bind(status.as_str());
    }
    if let Some(priority) = filter.priority {
        qb.push(" AND priority = ").push_bind(priority.as_str());
    }
    if let Some(assigned_to) = filter.assigned_to {
        qb.push(" AND assigned_to = ").push_bind(assigned_to as i64);
    }
}

fn map_task(row: &PgRow) -> Result<Task, sqlx::Error> {
    let status: String = row.try_get("status")?;
    let priority: String = row.try_get("priority")?;

    Ok(Task {
        id: row.try_get::<i64, _>("id")? as u64,
        title: row.try_get("title")?,
        description: row.try_get("description")?,
        status: status
            .parse()
            .map_err(|e| sqlx::Error::Decode(Box::new(e)))?,
        priority: priority
            .parse()
            .map_err(|e| sqlx::Error::Decode(Box::new(e)))?,
        assigned_to: row
            .try_get::<Option<i64>, _>("assigned_to")?
            .map(|v| v as u64),
        due_date: row.try_get("due_date")?,
        created_by: row
            .try_get::<Option<i64>, _>("created_by")?
            .map(|v| v as u64),
        updated_by: row
            .try_get::<Option<i64>, _>("updated_by")?
            .map(|v| v as u64),
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}
