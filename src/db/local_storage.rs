use std::path::Path;

use rusqlite::{params, Connection};

use super::schema;
use crate::error::PlannerResult;

/// Durable string key/value store, the desktop stand-in for a browser's
/// `localStorage`.
pub struct LocalStorage {
    conn: Connection,
}

impl LocalStorage {
    /// Open (or create) a storage file, creating parent directories.
    pub fn open(path: &Path) -> PlannerResult<Self> {
        if let Some(dir) = path.parent() {
            if !dir.as_os_str().is_empty() && !dir.exists() {
                std::fs::create_dir_all(dir)?;
            }
        }
        let conn = Connection::open(path)?;
        Self::from_connection(conn)
    }

    /// Storage that lives only as long as this value.
    pub fn in_memory() -> PlannerResult<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    pub fn from_connection(conn: Connection) -> PlannerResult<Self> {
        schema::initialize(&conn)?;
        Ok(Self { conn })
    }

    pub fn get_item(&self, key: &str) -> PlannerResult<Option<String>> {
        let result = self.conn.query_row(
            "SELECT value FROM local_storage WHERE key = ?1",
            params![key],
            |row| row.get::<_, String>(0),
        );
        match result {
            Ok(value) => Ok(Some(value)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub fn set_item(&self, key: &str, value: &str) -> PlannerResult<()> {
        self.conn.execute(
            "INSERT INTO local_storage (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = datetime('now')",
            params![key, value],
        )?;
        Ok(())
    }

    pub fn remove_item(&self, key: &str) -> PlannerResult<()> {
        self.conn
            .execute("DELETE FROM local_storage WHERE key = ?1", params![key])?;
        Ok(())
    }
}
