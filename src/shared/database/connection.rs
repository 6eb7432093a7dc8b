use anyhow::{Context, Result};
use sqlx::postgres::PgPool;

// 데이터베이스 연결 풀
// Database connection pool for PostgreSQL
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    // 데이터베이스 연결 생성
    // Create database connection
    pub async fn new(db_url: &str) -> Result<Self> {
        let pool = PgPool::connect(db_url)
            .await
            .context("Failed to connect to database")?;

        Ok(Self { pool })
    }

    /// Lazy connection (실제 연결은 첫 쿼리 시점에)
    /// Used by tests that exercise routing/middleware without a live
    /// database behind them.
    pub fn connect_lazy(db_url: &str) -> Result<Self> {
        let pool = PgPool::connect_lazy(db_url).context("Invalid database URL")?;

        Ok(Self { pool })
    }

    // 연결 풀 반환
    // Get connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    // 마이그레이션 실행 (migrations/ 폴더의 .sql 파일을 순서대로)
    // Run migrations from the migrations/ folder
    pub async fn initialize(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(self.pool())
            .await
            .context("Failed to run database migrations")?;

        tracing::info!("database migrations completed");
        Ok(())
    }
}
