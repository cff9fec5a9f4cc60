//! SQLite-backed list store
//!
//! One table holds every collection. `seq` is monotonically increasing, so
//! "head of the list" is simply the highest `seq` in a collection.

use async_trait::async_trait;
use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};
use std::path::Path;
use tracing::info;

use super::{ListRange, ListStore, StoreError};
use crate::Result;

#[derive(Debug, Clone)]
pub struct SqliteListStore {
    pool: SqlitePool,
}

impl SqliteListStore {
    /// Open (creating if needed) the database at `db_path`
    pub async fn open(db_path: &Path) -> Result<Self> {
        let newly_created = !db_path.exists();

        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let db_url = format!("sqlite://{}?mode=rwc", db_path.display());
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect(&db_url)
            .await?;

        if newly_created {
            info!("Initialized new story database: {}", db_path.display());
        } else {
            info!("Opened existing story database: {}", db_path.display());
        }

        // WAL lets page reads proceed while a submission is being written
        sqlx::query("PRAGMA journal_mode = WAL")
            .execute(&pool)
            .await?;
        sqlx::query("PRAGMA busy_timeout = 5000")
            .execute(&pool)
            .await?;

        Self::from_pool(pool).await
    }

    /// Wrap an existing pool, creating the schema if missing
    pub async fn from_pool(pool: SqlitePool) -> Result<Self> {
        create_list_entries_table(&pool).await?;
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

async fn create_list_entries_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS list_entries (
            seq INTEGER PRIMARY KEY AUTOINCREMENT,
            collection TEXT NOT NULL,
            payload TEXT NOT NULL,
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_list_entries_collection ON list_entries(collection, seq)",
    )
    .execute(pool)
    .await?;

    Ok(())
}

#[async_trait]
impl ListStore for SqliteListStore {
    fn backend_name(&self) -> &'static str {
        "sqlite"
    }

    async fn push_front(&self, collection: &str, entry: String) -> std::result::Result<(), StoreError> {
        sqlx::query("INSERT INTO list_entries (collection, payload) VALUES (?, ?)")
            .bind(collection)
            .bind(entry)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn range(
        &self,
        collection: &str,
        range: ListRange,
    ) -> std::result::Result<Vec<String>, StoreError> {
        // SQLite treats a negative LIMIT as "no limit"
        let limit = range.len().map(|n| n as i64).unwrap_or(-1);

        let rows: Vec<(String,)> = sqlx::query_as(
            "SELECT payload FROM list_entries WHERE collection = ? ORDER BY seq DESC LIMIT ? OFFSET ?",
        )
        .bind(collection)
        .bind(limit)
        .bind(range.start as i64)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|(payload,)| payload).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn temp_store() -> (tempfile::TempDir, SqliteListStore) {
        let dir = tempfile::tempdir().expect("Should create temp dir");
        let store = SqliteListStore::open(&dir.path().join("voices.db"))
            .await
            .expect("Should open store");
        (dir, store)
    }

    #[tokio::test]
    async fn test_open_creates_database_file() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("nested").join("voices.db");

        SqliteListStore::open(&db_path).await.unwrap();
        assert!(db_path.exists(), "Database file was not created");
    }

    #[tokio::test]
    async fn test_push_and_range_newest_first() {
        let (_dir, store) = temp_store().await;

        for entry in ["a", "b", "c"] {
            store.push_front("letters", entry.to_string()).await.unwrap();
        }

        let all = store.range("letters", ListRange::ALL).await.unwrap();
        assert_eq!(all, vec!["c", "b", "a"]);

        let middle = store.range("letters", ListRange::new(1, Some(1))).await.unwrap();
        assert_eq!(middle, vec!["b"]);
    }

    #[tokio::test]
    async fn test_collections_do_not_mix() {
        let (_dir, store) = temp_store().await;
        store.push_front("one", "x".to_string()).await.unwrap();
        store.push_front("two", "y".to_string()).await.unwrap();

        assert_eq!(store.range("one", ListRange::ALL).await.unwrap(), vec!["x"]);
        assert_eq!(store.range("two", ListRange::ALL).await.unwrap(), vec!["y"]);
    }

    #[tokio::test]
    async fn test_reopen_keeps_entries() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("voices.db");

        {
            let store = SqliteListStore::open(&db_path).await.unwrap();
            store.push_front("list", "kept".to_string()).await.unwrap();
            store.pool().close().await;
        }

        let store = SqliteListStore::open(&db_path).await.unwrap();
        assert_eq!(store.range("list", ListRange::ALL).await.unwrap(), vec!["kept"]);
    }

    #[tokio::test]
    async fn test_closed_pool_reports_unavailable() {
        let (_dir, store) = temp_store().await;
        store.pool().close().await;

        let result = store.push_front("list", "x".to_string()).await;
        assert!(matches!(result, Err(StoreError::Unavailable(_))));
    }
}
