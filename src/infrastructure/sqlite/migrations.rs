use crate::domain::error::DomainError;
use rusqlite::Connection;

pub fn run_migrations(conn: &Connection) -> Result<(), DomainError> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS examples (
            id TEXT PRIMARY KEY,
            document TEXT NOT NULL,
            metadata TEXT NOT NULL,
            embedding BLOB NOT NULL,
            updated_at TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS collection_meta (
            id INTEGER PRIMARY KEY CHECK (id = 0),
            model TEXT NOT NULL,
            dimension INTEGER NOT NULL,
            created_at TEXT NOT NULL
        );
        ",
    )
    .map_err(|e| DomainError::StoreWrite(format!("Migration failed: {e}")))
}
