use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;
use sqlx::{sqlite::SqlitePool, Row};

use super::DocumentStore;
use crate::error::{AppError, AppResult};

/// SQLite-backed document store. Documents are stored as JSON text in a
/// single table keyed by (collection, id); per-statement atomicity gives the
/// single-record guarantees the upper layers assume.
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    pub async fn connect(database_url: &str) -> AppResult<Self> {
        let pool = SqlitePool::connect(database_url).await.map_err(|e| {
            AppError::Store(format!("failed to connect to {}: {}", database_url, e))
        })?;
        let store = Self { pool };
        store.init().await?;
        Ok(store)
    }

    pub async fn new_in_memory() -> AppResult<Self> {
        Self::connect("sqlite::memory:").await
    }

    async fn init(&self) -> AppResult<()> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS documents (
                collection TEXT NOT NULL,
                id TEXT NOT NULL,
                data TEXT NOT NULL,
                created INTEGER NOT NULL,
                updated INTEGER NOT NULL,
                PRIMARY KEY (collection, id)
            )",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::Store(format!("failed to create documents table: {}", e)))?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_documents_collection ON documents(collection)",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::Store(format!("failed to create collection index: {}", e)))?;

        Ok(())
    }
}

#[async_trait]
impl DocumentStore for SqliteStore {
    async fn scan(&self, collection: &str) -> AppResult<Vec<Value>> {
        let rows = sqlx::query("SELECT data FROM documents WHERE collection = ?")
            .bind(collection)
            .fetch_all(&self.pool)
            .await?;

        rows.iter()
            .map(|row| {
                let data: String = row.get("data");
                serde_json::from_str(&data).map_err(AppError::from)
            })
            .collect()
    }

    async fn find(&self, collection: &str, id: &str) -> AppResult<Option<Value>> {
        let row = sqlx::query("SELECT data FROM documents WHERE collection = ? AND id = ?")
            .bind(collection)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => {
                let data: String = row.get("data");
                Ok(Some(serde_json::from_str(&data)?))
            }
            None => Ok(None),
        }
    }

    async fn insert(&self, collection: &str, id: &str, doc: Value) -> AppResult<()> {
        let now = Utc::now().timestamp_millis();
        sqlx::query(
            "INSERT INTO documents (collection, id, data, created, updated)
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(collection)
        .bind(id)
        .bind(doc.to_string())
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn replace(&self, collection: &str, id: &str, doc: Value) -> AppResult<bool> {
        let now = Utc::now().timestamp_millis();
        let result = sqlx::query(
            "UPDATE documents SET data = ?, updated = ? WHERE collection = ? AND id = ?",
        )
        .bind(doc.to_string())
        .bind(now)
        .bind(collection)
        .bind(id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn remove(&self, collection: &str, id: &str) -> AppResult<Option<Value>> {
        let existing = self.find(collection, id).await?;
        if existing.is_some() {
            sqlx::query("DELETE FROM documents WHERE collection = ? AND id = ?")
                .bind(collection)
                .bind(id)
                .execute(&self.pool)
                .await?;
        }
        Ok(existing)
    }

    async fn exists(&self, collection: &str, id: &str) -> AppResult<bool> {
        let row = sqlx::query("SELECT 1 FROM documents WHERE collection = ? AND id = ?")
            .bind(collection)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.is_some())
    }
}
