//! Slot persistence
//!
//! Profile and history are each stored as one JSON value under a fixed
//! slot name. Writes replace the whole value; there are no partial updates.
//! Components receive a [`SlotStore`] instead of reaching for global state,
//! so tests can hand them a [`MemorySlotStore`].

use async_trait::async_trait;
use serde::Serialize;
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use std::collections::HashMap;
use std::sync::Mutex;
use tracing::{debug, info};

pub type DbPool = SqlitePool;

/// Slot holding the saved measurement input
pub const PROFILE_SLOT: &str = "user-profile";
/// Slot holding the newest-first calculation history
pub const HISTORY_SLOT: &str = "calculation-history";

/// ---------------------------------------------------------------------------
/// Error Handling
/// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error, Serialize)]
#[serde(tag = "type", content = "message")]
pub enum StoreError {
  #[error("Database error: {0}")]
  Database(String),

  #[error("Migration failed: {0}")]
  Migration(String),

  #[error("Serialization error: {0}")]
  Serialization(String),
}

impl From<sqlx::Error> for StoreError {
  fn from(e: sqlx::Error) -> Self {
    StoreError::Database(e.to_string())
  }
}

impl From<serde_json::Error> for StoreError {
  fn from(e: serde_json::Error) -> Self {
    StoreError::Serialization(e.to_string())
  }
}

/// ---------------------------------------------------------------------------
/// Persistence Port
/// ---------------------------------------------------------------------------

/// Named-slot key-value storage
#[async_trait]
pub trait SlotStore: Send + Sync {
  /// Read a slot; `None` when nothing has been written yet
  async fn read_slot(&self, key: &str) -> Result<Option<String>, StoreError>;

  /// Replace a slot's value
  async fn write_slot(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// ---------------------------------------------------------------------------
/// SQLite Store
/// ---------------------------------------------------------------------------

/// Initialize the database connection pool and run migrations
pub async fn initialize_db(db_url: &str) -> Result<DbPool, StoreError> {
  info!(db_url, "Initializing database");

  let pool = SqlitePoolOptions::new()
    .max_connections(5)
    .connect(db_url)
    .await?;

  sqlx::migrate!("./migrations")
    .run(&pool)
    .await
    .map_err(|e| StoreError::Migration(e.to_string()))?;

  info!("Database initialized successfully");

  Ok(pool)
}

#[derive(Clone)]
pub struct SqliteSlotStore {
  pool: DbPool,
}

impl SqliteSlotStore {
  pub fn new(pool: DbPool) -> Self {
    Self { pool }
  }

  /// Open (creating if needed) the database at `db_url`
  pub async fn connect(db_url: &str) -> Result<Self, StoreError> {
    Ok(Self::new(initialize_db(db_url).await?))
  }
}

#[async_trait]
impl SlotStore for SqliteSlotStore {
  async fn read_slot(&self, key: &str) -> Result<Option<String>, StoreError> {
    let value: Option<String> = sqlx::query_scalar("SELECT value FROM kv_slots WHERE key = ?1")
      .bind(key)
      .fetch_optional(&self.pool)
      .await?;

    debug!(key, found = value.is_some(), "Read slot");
    Ok(value)
  }

  async fn write_slot(&self, key: &str, value: &str) -> Result<(), StoreError> {
    sqlx::query(
      r#"
      INSERT INTO kv_slots (key, value, updated_at)
      VALUES (?1, ?2, CURRENT_TIMESTAMP)
      ON CONFLICT(key) DO UPDATE SET
        value = excluded.value,
        updated_at = excluded.updated_at
      "#,
    )
    .bind(key)
    .bind(value)
    .execute(&self.pool)
    .await?;

    debug!(key, bytes = value.len(), "Wrote slot");
    Ok(())
  }
}

/// ---------------------------------------------------------------------------
/// In-Memory Store
/// ---------------------------------------------------------------------------

/// Process-local store for tests and throwaway sessions
#[derive(Default)]
pub struct MemorySlotStore {
  slots: Mutex<HashMap<String, String>>,
}

impl MemorySlotStore {
  pub fn new() -> Self {
    Self::default()
  }
}

#[async_trait]
impl SlotStore for MemorySlotStore {
  async fn read_slot(&self, key: &str) -> Result<Option<String>, StoreError> {
    let slots = self
      .slots
      .lock()
      .map_err(|e| StoreError::Database(e.to_string()))?;
    Ok(slots.get(key).cloned())
  }

  async fn write_slot(&self, key: &str, value: &str) -> Result<(), StoreError> {
    let mut slots = self
      .slots
      .lock()
      .map_err(|e| StoreError::Database(e.to_string()))?;
    slots.insert(key.to_string(), value.to_string());
    Ok(())
  }
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
