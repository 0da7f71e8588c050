use anyhow::Context;
use domain::persistence::STORAGE_KEY;
use domain::{PersistedState, StateStore};
use rusqlite::{params, Connection, OptionalExtension, Result as SqlResult};
use shared::types::Result;
use std::path::Path;
use std::sync::Mutex;
use tracing::debug;

/// Key-value table holding one JSON document per namespace key.
pub struct SqliteStateStore {
    conn: Mutex<Connection>,
    key: String,
}

impl SqliteStateStore {
    pub fn open(db_path: impl AsRef<Path>) -> Result<Self> {
        let db_path = db_path.as_ref();
        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create {}", parent.display()))?;
            }
        }
        let conn = Connection::open(db_path)
            .with_context(|| format!("Failed to open state db at {}", db_path.display()))?;
        Self::setup_db(&conn)?;
        Ok(Self::with_connection(conn))
    }

    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::setup_db(&conn)?;
        Ok(Self::with_connection(conn))
    }

    /// Stores under a different namespace key.
    pub fn with_key(mut self, key: &str) -> Self {
        self.key = key.to_string();
        self
    }

    fn with_connection(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
            key: STORAGE_KEY.to_string(),
        }
    }

    fn setup_db(conn: &Connection) -> SqlResult<()> {
        conn.execute_batch(
            "
            PRAGMA journal_mode=WAL;
            PRAGMA synchronous=NORMAL;
            CREATE TABLE IF NOT EXISTS kv_store (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );
        ",
        )
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| anyhow::anyhow!("state store lock poisoned"))
    }
}

impl StateStore for SqliteStateStore {
    fn load(&self) -> Result<Option<PersistedState>> {
        let conn = self.lock()?;
        let raw: Option<String> = conn
            .query_row(
                "SELECT value FROM kv_store WHERE key = ?1",
                params![self.key],
                |row| row.get(0),
            )
            .optional()?;
        match raw {
            Some(json) => {
                let state: PersistedState = serde_json::from_str(&json)
                    .with_context(|| format!("Corrupt saved state under '{}'", self.key))?;
                Ok(Some(state))
            }
            None => Ok(None),
        }
    }

    fn save(&self, state: &PersistedState) -> Result<()> {
        let json = serde_json::to_string(state)?;
        let conn = self.lock()?;
        conn.execute(
            "INSERT OR REPLACE INTO kv_store (key, value) VALUES (?1, ?2)",
            params![self.key, json],
        )?;
        debug!(records = state.history.len(), "state saved");
        Ok(())
    }
}
