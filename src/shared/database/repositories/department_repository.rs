use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use crate::domains::admin::models::Department;

const DEPARTMENT_COLUMNS: &str =
    "id, name, description, manager_id, created_by, created_at, updated_at";

pub struct DepartmentRepository {
    pool: PgPool,
}

impl DepartmentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        name: &str,
        description: Option<&str>,
        manager_id: Option<u64>,
        created_by: u64,
    ) -> Result<Department, sqlx::Error> {
        let row = sqlx::query(&format!(
            r#"
            INSERT INTO departments (name, description, manager_id, created_by, created_at, updated_at)
            VALUES ($1, $2, $3, $4, NOW(), NOW())
            RETURNING {DEPARTMENT_COLUMNS}
            "#
        ))
        .bind(name)
        .bind(description)
        .bind(manager_id.map(|v| v as i64))
        .bind(created_by as i64)
        .fetch_one(&self.pool)
        .await?;

        map_department(&row)
    }

    pub async fn find_by_id(&self, id: u64) -> Result<Option<Department>, sqlx::Error> {
        let row = sqlx::query(&format!(
            "SELECT {DEPARTMENT_COLUMNS} FROM departments WHERE id = $1"
        ))
        .bind(id as i64)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(map_department).transpose()
    }

    pub async fn find_by_name(&self, name: &str) -> Result<Option<Department>, sqlx::Error> {
        let row = sqlx::query(&format!(
            "SELECT {DEPARTMENT_COLUMNS} FROM departments WHERE name = $1"
        ))
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(map_department).transpose()
    }

    pub async fn list(&self) -> Result<Vec<Department>, sqlx::Error> {
        let rows = sqlx::query(&format!(
            "SELECT {DEPARTMENT_COLUMNS} FROM departments ORDER BY name"
        ))
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(map_department).collect()
    }

    pub async fn delete(&self, id: u64) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM departments WHERE id = $1")
            .bind(id as i64)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    pub async fn count_all(&self) -> Result<i64, sqlx::Error> {
        let row = sqlx::query("SELECT COUNT(*) FROM departments")
            .fetch_one(&self.pool)
            .await?;
        row.try_get(0)
    }
}

fn map_department(row: &PgRow) -> Result<Department, sqlx::Error> {
    Ok(Department {
        id: row.try_get::<i64, _>("id")? as u64,
        name: row.try_get("name")?,
        description: row.try_get("description")?,
        manager_id: row
            .try_get::<Option<i64>, _>("manager_id")?
            .map(|v| v as u64),
        created_by: row
            .try_get::<Option<i64>, _>("created_by")?
            .map(|v| v as u64),
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}
