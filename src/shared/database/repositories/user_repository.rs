use chrono::Utc;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Postgres, QueryBuilder, Row};

use crate::domains::auth::models::user::{Role, User, UserStatus};

const USER_COLUMNS: &str = "id, first_name, last_name, email, password_hash, role, status, \
     department_id, position, phone_number, email_verified, created_by, updated_by, \
     created_at, updated_at";

/// New user row (회원가입/관리자 생성 공통)
#[derive(Debug)]
pub struct NewUser<'a> {
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub email: &'a str,
    pub password_hash: &'a str,
    pub role: Role,
    pub department_id: Option<u64>,
    pub position: Option<&'a str>,
    pub phone_number: Option<&'a str>,
    pub created_by: Option<u64>,
}

/// Partial update (관리자용: None인 필드는 기존 값 유지)
/// None fields keep their current value (COALESCE semantics).
#[derive(Debug, Default)]
pub struct UserChanges {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub role: Option<Role>,
    pub status: Option<UserStatus>,
    pub department_id: Option<u64>,
    pub position: Option<String>,
    pub phone_number: Option<String>,
}

/// Self-service profile update (role/status/email 제외)
#[derive(Debug, Default)]
pub struct ProfileChanges {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub position: Option<String>,
    pub phone_number: Option<String>,
}

/// List filter (관리자 사용자 목록용)
#[derive(Debug, Default)]
pub struct UserFilter {
    pub role: Option<Role>,
    pub department_id: Option<u64>,
    pub status: Option<UserStatus>,
    /// Case-insensitive substring over first name / last name / email
    pub search: Option<String>,
}

pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, user: NewUser<'_>) -> Result<User, sqlx::Error> {
        let row = sqlx::query(&format!(
            r#"
            INSERT INTO users
                (first_name, last_name, email, password_hash, role, status,
                 department_id, position, phone_number, created_by, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, 'active', $6, $7, $8, $9, $10, $10)
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(user.first_name)
        .bind(user.last_name)
        .bind(user.email)
        .bind(user.password_hash)
        .bind(user.role.as_str())
        .bind(user.department_id.map(|v| v as i64))
        .bind(user.position)
        .bind(user.phone_number)
        .bind(user.created_by.map(|v| v as i64))
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        map_user(&row)
    }

    // 이메일로 사용자 조회 (로그인용)
    // Get user by email (for login)
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, sqlx::Error> {
        let row = sqlx::query(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(map_user).transpose()
    }

    // ID로 사용자 조회
    // Get user by ID
    pub async fn find_by_id(&self, id: u64) -> Result<Option<User>, sqlx::Error> {
        let row = sqlx::query(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"))
            .bind(id as i64)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(map_user).transpose()
    }

    /// 관리자용 부분 업데이트 (없는 필드는 기존 값 유지)
    pub async fn update(
        &self,
        id: u64,
        changes: UserChanges,
        updated_by: u64,
    ) -> Result<Option<User>, sqlx::Error> {
        let row = sqlx::query(&format!(
            r#"
            UPDATE users SET
                first_name = COALESCE($2, first_name),
                last_name = COALESCE($3, last_name),
                email = COALESCE($4, email),
                role = COALESCE($5, role),
                status = COALESCE($6, status),
                department_id = COALESCE($7, department_id),
                position = COALESCE($8, position),
                phone_number = COALESCE($9, phone_number),
                updated_by = $10,
                updated_at = NOW()
            WHERE id = $1
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(id as i64)
        .bind(changes.first_name)
        .bind(changes.last_name)
        .bind(changes.email)
        .bind(changes.role.map(|r| r.as_str()))
        .bind(changes.status.map(|s| s.as_str()))
        .bind(changes.department_id.map(|v| v as i64))
        .bind(changes.position)
        .bind(changes.phone_number)
        .bind(updated_by as i64)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(map_user).transpose()
    }

    /// 본인 프로필 업데이트 (이름/직책/전화번호만)
    pub async fn update_profile(
        &self,
        id: u64,
        changes: ProfileChanges,
    ) -> Result<Option<User>, sqlx::Error> {
        let row = sqlx::query(&format!(
            r#"
            UPDATE users SET
                first_name = COALESCE($2, first_name),
                last_name = COALESCE($3, last_name),
                position = COALESCE($4, position),
                phone_number = COALESCE($5, phone_number),
                updated_by = $1,
                updated_at = NOW()
            WHERE id = $1
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(id as i64)
        .bind(changes.first_name)
        .bind(changes.last_name)
        .bind(changes.position)
        .bind(changes.phone_number)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(map_user).transpose()
    }

    pub async fn update_password(&self, id: u64, password_hash: &str) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE users SET password_hash = $2, updated_at = NOW() WHERE id = $1")
            .bind(id as i64)
            .bind(password_hash)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    pub async fn set_email_verified(&self, id: u64) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE users SET email_verified = TRUE, updated_at = NOW() WHERE id = $1")
            .bind(id as i64)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    pub async fn delete(&self, id: u64) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id as i64)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    /// 필터 + 페이지네이션 목록 조회 (최신 생성순)
    /// Filtered, paginated listing (newest first)
    pub async fn list(
        &self,
        filter: &UserFilter,
        limit: u32,
        offset: i64,
    ) -> Result<Vec<User>, sqlx::Error> {
        let mut qb = QueryBuilder::<Postgres>::new(format!(
            "SELECT {USER_COLUMNS} FROM users WHERE 1=1"
        ));
        push_user_filter(&mut qb, filter);
        qb.push(" ORDER BY created_at DESC LIMIT ")
            .push_bind(i64::from(limit))
            .push(" OFFSET ")
            .push_bind(offset);

        let rows = qb.build().fetch_all(&self.pool).await?;
        rows.iter().map(map_user).collect()
    }

    /// 필터에 해당하는 전체 레코드 수 (페이지네이션 total)
    pub async fn count(&self, filter: &UserFilter) -> Result<i64, sqlx::Error> {
        let mut qb = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM users WHERE 1=1");
        push_user_filter(&mut qb, filter);

        let row = qb.build().fetch_one(&self.pool).await?;
        row.try_get(0)
    }

    pub async fn list_by_department(&self, department_id: u64) -> Result<Vec<User>, sqlx::Error> {
        let rows = sqlx::query(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE department_id = $1 ORDER BY last_name, first_name"
        ))
        .bind(department_id as i64)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(map_user).collect()
    }

    /// 최근 가입자 (통계용)
    pub async fn recent(&self, limit: i64) -> Result<Vec<User>, sqlx::Error> {
        let rows = sqlx::query(&format!(
            "SELECT {USER_COLUMNS} FROM users ORDER BY created_at DESC LIMIT $1"
        ))
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(map_user).collect()
    }

    pub async fn count_all(&self) -> Result<i64, sqlx::Error> {
        let row = sqlx::query("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;
        row.try_get(0)
    }

    pub async fn count_by_status(&self, status: UserStatus) -> Result<i64, sqlx::Error> {
        let row = sqlx::query("SELECT COUNT(*) FROM users WHERE status = $1")
            .bind(status.as_str())
            .fetch_one(&self.pool)
            .await?;
        row.try_get(0)
    }

    pub async fn count_by_role(&self, role: Role) -> Result<i64, sqlx::Error> {
        let row = sqlx::query("SELECT COUNT(*) FROM users WHERE role = $1")
            .bind(role.as_str())
            .fetch_one(&self.pool)
            .await?;
        row.try_get(0)
    }
}

/// WHERE 절 공통 구성 (목록/카운트 쿼리가 같은 필터를 공유)
fn push_user_filter(qb: &mut QueryBuilder<'_, Postgres>, filter: &UserFilter) {
    if let Some(role) = filter.role {
        qb.push(" AND role = ").push_bind(role.as_str());
    }
    if let Some(department_id) = filter.department_id {
        qb.push(" AND department_id = ").push_bind(department_id as i64);
    }
    if let Some(status) = filter.status {
        qb.push(" AND status = ").push_bind(status.as_str());
    }
    if let Some(search) = &filter.search {
        let pattern = format!("%{}%", search);
        qb.push(" AND (first_name ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR last_name ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR email ILIKE ")
            .push_bind(pattern)
            .push(")");
    }
}

fn map_user(row: &PgRow) -> Result<User, sqlx::Error> {
    let role: String = row.try_get("role")?;
    let status: String = row.try_get("status")?;

    Ok(User {
        id: row.try_get::<i64, _>("id")? as u64,
        first_name: row.try_get("first_name")?,
        last_name: row.try_get("last_name")?,
        email: row.try_get("email")?,
        password_hash: row.try_get("password_hash")?,
        role: role
            .parse()
            .map_err(|e| sqlx::Error::Decode(Box::new(e)))?,
        status: status
            .parse()
            .map_err(|e| sqlx::Error::Decode(Box::new(e)))?,
        department_id: row
            .try_get::<Option<i64>, _>("department_id")?
            .map(|v| v as u64),
        position: row.try_get("position")?,
        phone_number: row.try_get("phone_number")?,
        email_verified: row.try_get("email_verified")?,
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
