use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;
use tokio::sync::Mutex;

use crate::error::StoreError;

/// Boundary to the on-device key-value facility. One named collection is
/// stored whole under one key; there is no partial or delta write.
#[async_trait]
pub trait Storage: Send + Sync {
    async fn put(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// `None` means the key has never been written, which is distinct from
    /// a key holding an empty collection.
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
}

pub struct SqliteStorage {
    db: SqlitePool,
}

impl SqliteStorage {
    /// Opens the backing database and applies the schema. The pool is capped
    /// at one connection: there is exactly one reader/writer per application
    /// instance, and collection writes must not interleave.
    pub async fn connect(database_url: &str) -> Result<Self, StoreError> {
        let db = SqlitePoolOptions::new()
            .max_connections(1)
            .connect(database_url)
            .await?;

        sqlx::migrate!("./migrations").run(&db).await?;

        Ok(Self { db })
    }
}

#[async_trait]
impl Storage for SqliteStorage {
    async fn put(&self, key: &str, value: &str) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO collections (key, value) VALUES (?1, ?2) \
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
        )
        .bind(key)
        .bind(value)
        .execute(&self.db)
        .await?;
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let value = sqlx::query_scalar::<_, String>("SELECT value FROM collections WHERE key = ?1")
            .bind(key)
            .fetch_optional(&self.db)
            .await?;
        Ok(value)
    }
}

/// In-process storage for tests and ephemeral sessions.
#[derive(Default)]
pub struct MemoryStorage {
    data: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn put(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut data = self.data.lock().await;
        data.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let data = self.data.lock().await;
        Ok(data.get(key).cloned())
    }
}
