use anyhow::Result;
use log::info;
use sqlx::{migrate::MigrateDatabase, Sqlite, SqlitePool};
use std::sync::Arc;

/// DbConnection owns the SQLite pool and the tracker schema
#[derive(Clone)]
pub struct DbConnection {
    pool: Arc<SqlitePool>,
}

impl DbConnection {
    /// Create a new database connection
    pub async fn new(url: &str) -> Result<Self> {
        // Create database if it doesn't exist
        if !Sqlite::database_exists(url).await.unwrap_or(false) {
            info!("Creating database at {}", url);
            Sqlite::create_database(url).await?
        }

        let pool = SqlitePool::connect(url).await?;
        Self::setup_schema(&pool).await?;

        Ok(Self { pool: Arc::new(pool) })
    }

    /// Initialize a database file inside a test directory
    #[cfg(test)]
    pub async fn init_test(dir: &std::path::Path) -> Result<Self> {
        let db_url = format!("sqlite://{}", dir.join("tracker_test.db").display());
        Self::new(&db_url).await
    }

    /// Get a reference to the connection pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Set up the required database schema
    async fn setup_schema(pool: &SqlitePool) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS therapists (
                name TEXT PRIMARY KEY NOT NULL
            );
            "#,
        )
        .execute(pool)
        .await?;

        // payment holds the JSON-encoded tender split
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS service_entries (
                id TEXT PRIMARY KEY,
                bill_no TEXT NOT NULL,
                customer_name TEXT NOT NULL,
                phone_no TEXT NOT NULL DEFAULT '',
                staff_name TEXT NOT NULL,
                in_time TEXT NOT NULL,
                out_time TEXT NOT NULL DEFAULT '',
                payment TEXT NOT NULL,
                remarks TEXT NOT NULL DEFAULT '',
                created_at TEXT NOT NULL
            );
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_service_entries_created_at
            ON service_entries(created_at);
            "#,
        )
        .execute(pool)
        .await?;

        Ok(())
    }
}
