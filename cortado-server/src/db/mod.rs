//! Database layer
//!
//! Embedded SQLite via sqlx. [`DbService`] owns pool construction and
//! schema migration; data access lives in [`repository`] as free
//! functions taking `&SqlitePool`.

pub mod repository;

use std::time::Duration;

use sqlx::sqlite::{
    SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions, SqliteSynchronous,
};

use crate::utils::{AppError, AppResult};

/// Database service
#[derive(Debug, Clone)]
pub struct DbService {
    pub pool: SqlitePool,
}

impl DbService {
    /// Open (creating if missing) the database at `db_path` and run
    /// pending migrations
    pub async fn new(db_path: &str) -> AppResult<Self> {
        let options = SqliteConnectOptions::new()
            .filename(db_path)
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .foreign_keys(true)
            .busy_timeout(Duration::from_millis(5000));

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(5))
            .connect_with(options)
            .await
            .map_err(|e| AppError::database(format!("Failed to open database: {}", e)))?;

        Self::migrate(&pool).await?;

        tracing::info!("Database ready at {}", db_path);
        Ok(Self { pool })
    }

    /// In-memory database for tests
    ///
    /// Each SQLite `:memory:` connection is its own database, so the
    /// pool is pinned to a single connection.
    pub async fn in_memory() -> AppResult<Self> {
        let options = SqliteConnectOptions::new()
            .in_memory(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .map_err(|e| AppError::database(format!("Failed to open in-memory database: {}", e)))?;

        Self::migrate(&pool).await?;
        Ok(Self { pool })
    }

    async fn migrate(pool: &SqlitePool) -> AppResult<()> {
        sqlx::migrate!("./migrations")
            .run(pool)
            .await
            .map_err(|e| AppError::database(format!("Migration failed: {}", e)))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_in_memory_has_schema() {
        let db = DbService::in_memory().await.unwrap();
        let tables: Vec<(String,)> = sqlx::query_as(
            "SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name",
        )
        .fetch_all(&db.pool)
        .await
        .unwrap();

        let names: Vec<&str> = tables.iter().map(|(n,)| n.as_str()).collect();
        for expected in ["categories", "order_items", "orders", "products", "users"] {
            assert!(names.contains(&expected), "missing table {expected}");
        }
    }

    #[tokio::test]
    async fn test_file_backed_database_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cortado.db");
        let path = path.to_str().unwrap();

        {
            let db = DbService::new(path).await.unwrap();
            sqlx::query("INSERT INTO categories (name) VALUES ('Cà Phê')")
                .execute(&db.pool)
                .await
                .unwrap();
            db.pool.close().await;
        }

        let db = DbService::new(path).await.unwrap();
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM categories")
            .fetch_one(&db.pool)
            .await
            .unwrap();
        assert_eq!(count, 1);
    }
}
