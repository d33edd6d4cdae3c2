use rusqlite::Connection;

use crate::error::PlannerResult;

/// Initialize the storage schema. Creates the table if it doesn't exist.
pub fn initialize(conn: &Connection) -> PlannerResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS local_storage (
            key TEXT PRIMARY KEY NOT NULL,
            value TEXT NOT NULL,
            updated_at TEXT NOT NULL DEFAULT (datetime('now'))
        );
        ",
    )?;
    Ok(())
}
