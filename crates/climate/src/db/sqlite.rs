use anyhow::{anyhow, Context, Result};
use log::info;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::{path::Path, time::Duration};

/// Read-only handle to the observations database.
///
/// Every query checks a connection out of the pool and hands it back when
/// the query future completes or is dropped, so no request holds a
/// connection past its own lifetime.
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    pub async fn new(path: &str, max_connections: u32) -> Result<Self> {
        if !Path::new(path).is_file() {
            return Err(anyhow!("observations database not found at: {}", path));
        }

        let options = SqliteConnectOptions::new()
            .filename(path)
            .read_only(true)
            .create_if_missing(false)
            .pragma("busy_timeout", "5000")
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "MEMORY");

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(Duration::from_secs(30))
            .connect_with(options)
            .await
            .context("Failed to create database connection pool")?;

        let db = Self { pool };
        db.health_check().await?;
        info!("SQLite database opened read-only at: {}", path);

        Ok(db)
    }

    /// Wraps an existing pool, used to point the service at a fixture database.
    pub fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Check database connectivity and that both tables are present.
    pub async fn health_check(&self) -> Result<()> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .context("Database connectivity check failed")?;

        for table in ["measurement", "station"] {
            let found: i64 = sqlx::query_scalar(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?",
            )
            .bind(table)
            .fetch_one(&self.pool)
            .await
            .with_context(|| format!("Failed to look up table {}", table))?;

            if found == 0 {
                return Err(anyhow!("Database is missing the {} table", table));
            }
        }

        Ok(())
    }
}
