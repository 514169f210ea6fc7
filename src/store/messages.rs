//! SQLite-backed message store
//!
//! One table, one connection. Every query runs on the blocking pool so
//! async handlers never wait on disk I/O.

use chrono::{DateTime, SubsecRound, Utc};
use rusqlite::{params, types::Type, Connection, OptionalExtension, Row};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use super::error::{StoreError, StoreResult};
use super::types::{ContactFormDraft, ContactMessage};

const SCHEMA: &str = r#"
    CREATE TABLE IF NOT EXISTS contact_messages (
        id TEXT PRIMARY KEY,
        name TEXT NOT NULL,
        email TEXT NOT NULL,
        subject TEXT NOT NULL,
        message TEXT NOT NULL,
        timestamp INTEGER NOT NULL,
        is_read INTEGER NOT NULL DEFAULT 0
    );
    CREATE INDEX IF NOT EXISTS idx_contact_messages_timestamp
        ON contact_messages (timestamp DESC);
"#;

/// Configuration for the message store
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// SQLite database file; `None` keeps everything in memory
    pub database_path: Option<PathBuf>,
    /// Maximum number of messages returned by a listing
    pub list_limit: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            database_path: None,
            list_limit: 100,
        }
    }
}

impl StoreConfig {
    pub fn new(database_path: impl Into<PathBuf>) -> Self {
        Self {
            database_path: Some(database_path.into()),
            ..Default::default()
        }
    }
}

/// Persistent contact message store
#[derive(Debug, Clone)]
pub struct MessageStore {
    conn: Arc<Mutex<Connection>>,
    list_limit: usize,
}

impl MessageStore {
    /// Open (or create) the store described by `config`
    pub fn open(config: &StoreConfig) -> StoreResult<Self> {
        let conn = match &config.database_path {
            Some(path) => {
                if let Some(parent) = path.parent() {
                    if !parent.as_os_str().is_empty() {
                        std::fs::create_dir_all(parent)?;
                    }
                }
                let conn = Connection::open(path)?;
                conn.execute_batch("PRAGMA journal_mode = WAL;")?;
                conn
            }
            None => Connection::open_in_memory()?,
        };
        conn.execute_batch(SCHEMA)?;

        tracing::debug!(path = ?config.database_path, "Message store opened");

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
            list_limit: config.list_limit.max(1),
        })
    }

    /// Open a database file with default settings
    pub fn open_path(path: &Path) -> StoreResult<Self> {
        Self::open(&StoreConfig::new(path))
    }

    /// In-memory store, mostly for tests
    pub fn open_in_memory() -> StoreResult<Self> {
        Self::open(&StoreConfig::default())
    }

    /// Default listing cap
    pub fn list_limit(&self) -> usize {
        self.list_limit
    }

    async fn with_conn<F, T>(&self, f: F) -> StoreResult<T>
    where
        F: FnOnce(&Connection) -> StoreResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let guard = conn
                .lock()
                .map_err(|_| StoreError::Lock("connection mutex poisoned".to_string()))?;
            f(&guard)
        })
        .await
        .map_err(|e| StoreError::Task(e.to_string()))?
    }

    /// Persist a new message, assigning its id and timestamp
    pub async fn insert(&self, draft: ContactFormDraft) -> StoreResult<ContactMessage> {
        let message = ContactMessage {
            id: uuid::Uuid::new_v4().to_string(),
            name: draft.name,
            email: draft.email,
            subject: draft.subject,
            message: draft.message,
            // Stored with millisecond precision
            timestamp: Utc::now().trunc_subsecs(3),
            is_read: false,
        };

        let row = message.clone();
        self.with_conn(move |conn| {
            conn.execute(
                "INSERT INTO contact_messages (id, name, email, subject, message, timestamp, is_read)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![
                    row.id,
                    row.name,
                    row.email,
                    row.subject,
                    row.message,
                    row.timestamp.timestamp_millis(),
                    row.is_read,
                ],
            )?;
            Ok(())
        })
        .await?;

        tracing::info!(message_id = %message.id, "Stored contact message");
        Ok(message)
    }

    /// Newest messages first, at most the configured list limit
    pub async fn list(&self) -> StoreResult<Vec<ContactMessage>> {
        self.list_with_limit(self.list_limit).await
    }

    /// Newest messages first, at most `limit`
    pub async fn list_with_limit(&self, limit: usize) -> StoreResult<Vec<ContactMessage>> {
        self.with_conn(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT id, name, email, subject, message, timestamp, is_read
                 FROM contact_messages
                 ORDER BY timestamp DESC, rowid DESC
                 LIMIT ?1",
            )?;
            let rows = stmt.query_map(params![limit as i64], read_row)?;

            let mut messages = Vec::new();
            for row in rows {
                messages.push(row?);
            }
            Ok(messages)
        })
        .await
    }

    /// Fetch a single message
    pub async fn get(&self, id: &str) -> StoreResult<Option<ContactMessage>> {
        let id = id.to_string();
        self.with_conn(move |conn| {
            let found = conn
                .query_row(
                    "SELECT id, name, email, subject, message, timestamp, is_read
                     FROM contact_messages WHERE id = ?1",
                    params![id],
                    read_row,
                )
                .optional()?;
            Ok(found)
        })
        .await
    }

    /// Flag a message as read.
    ///
    /// Returns `false` when no message has this id. Marking an already read
    /// message succeeds again: the update counts matched rows, not changed
    /// ones, so a repeated PATCH answers 200 rather than 404 (a store
    /// counting modified rows would report the second call as missing).
    pub async fn mark_read(&self, id: &str) -> StoreResult<bool> {
        let id = id.to_string();
        let updated = self
            .with_conn(move |conn| {
                let changed = conn.execute(
                    "UPDATE contact_messages SET is_read = 1 WHERE id = ?1",
                    params![id],
                )?;
                Ok(changed > 0)
            })
            .await?;
        Ok(updated)
    }

    /// Total number of stored messages
    pub async fn count(&self) -> StoreResult<u64> {
        self.count_where("SELECT COUNT(*) FROM contact_messages")
            .await
    }

    /// Number of messages not yet read
    pub async fn unread_count(&self) -> StoreResult<u64> {
        self.count_where("SELECT COUNT(*) FROM contact_messages WHERE is_read = 0")
            .await
    }

    async fn count_where(&self, sql: &'static str) -> StoreResult<u64> {
        self.with_conn(move |conn| {
            let n: i64 = conn.query_row(sql, [], |row| row.get(0))?;
            Ok(n.max(0) as u64)
        })
        .await
    }
}

fn read_row(row: &Row<'_>) -> rusqlite::Result<ContactMessage> {
    let millis: i64 = row.get(5)?;
    let timestamp = DateTime::<Utc>::from_timestamp_millis(millis).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            5,
            Type::Integer,
            format!("timestamp out of range: {}", millis).into(),
        )
    })?;

    Ok(ContactMessage {
        id: row.get(0)?,
        name: row.get(1)?,
        email: row.get(2)?,
        subject: row.get(3)?,
        message: row.get(4)?,
        timestamp,
        is_read: row.get(6)?,
    })
}
