//! SQLite-backed adventure storage.
//!
//! One `kv_store` table with a row per slot. `commit` writes both slots in a
//! single transaction.

use async_trait::async_trait;
use echoes_domain::{StoryCollection, UserProfile};
use sqlx::{Row, Sqlite, SqlitePool, Transaction};
use std::sync::Arc;

use super::envelope::{self, ADVENTURES_KEY, PROFILE_KEY};
use crate::infrastructure::ports::{AdventureStore, ClockPort, RepoError};

/// SQLite implementation of [`AdventureStore`].
pub struct SqliteAdventureStore {
    pool: SqlitePool,
    clock: Arc<dyn ClockPort>,
}

impl SqliteAdventureStore {
    pub async fn new(db_path: &str, clock: Arc<dyn ClockPort>) -> Result<Self, RepoError> {
        let pool = SqlitePool::connect(&format!("sqlite:{}?mode=rwc", db_path))
            .await
            .map_err(|e| RepoError::database("connect", e))?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS kv_store (
                key TEXT PRIMARY KEY NOT NULL,
                value_json TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            "#,
        )
        .execute(&pool)
        .await
        .map_err(|e| RepoError::database("migrate", e))?;

        Ok(Self { pool, clock })
    }

    async fn get(&self, key: &str) -> Result<Option<String>, RepoError> {
        let row = sqlx::query("SELECT value_json FROM kv_store WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepoError::database("get", e))?;

        Ok(row.map(|row| row.get::<String, _>("value_json")))
    }

    async fn put(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        key: &str,
        value_json: String,
    ) -> Result<(), RepoError> {
        let now = self.clock.now().to_rfc3339();
        sqlx::query(
            r#"
            INSERT INTO kv_store (key, value_json, updated_at)
            VALUES (?, ?, ?)
            ON CONFLICT(key) DO UPDATE SET
                value_json = excluded.value_json,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(key)
        .bind(value_json)
        .bind(now)
        .execute(&mut **tx)
        .await
        .map_err(|e| RepoError::database("put", e))?;
        Ok(())
    }
}

#[async_trait]
impl AdventureStore for SqliteAdventureStore {
    async fn load_stories(&self) -> Result<StoryCollection, RepoError> {
        match self.get(ADVENTURES_KEY).await? {
            Some(json) => envelope::decode(&json),
            None => Ok(StoryCollection::new()),
        }
    }

    async fn load_profile(&self) -> Result<Option<UserProfile>, RepoError> {
        self.get(PROFILE_KEY)
            .await?
            .map(|json| envelope::decode(&json))
            .transpose()
    }

    async fn save_profile(&self, profile: &UserProfile) -> Result<(), RepoError> {
        let json = envelope::encode(profile)?;
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| RepoError::database("begin", e))?;
        self.put(&mut tx, PROFILE_KEY, json).await?;
        tx.commit()
            .await
            .map_err(|e| RepoError::database("commit", e))
    }

    async fn commit(
        &self,
        stories: &StoryCollection,
        profile: &UserProfile,
    ) -> Result<(), RepoError> {
        // Encode both before opening the transaction so a serialization
        // failure never leaves a half-written pair.
        let stories_json = envelope::encode(stories)?;
        let profile_json = envelope::encode(profile)?;

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| RepoError::database("begin", e))?;
        self.put(&mut tx, ADVENTURES_KEY, stories_json).await?;
        self.put(&mut tx, PROFILE_KEY, profile_json).await?;
        tx.commit()
            .await
            .map_err(|e| RepoError::database("commit", e))?;

        tracing::debug!(stories = stories.len(), "Committed adventures and profile");
        Ok(())
    }
}
