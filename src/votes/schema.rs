//! SQLite DDL for the vote store

use rusqlite::Connection;

/// Longest URL accepted as a vote key
pub const MAX_URL_LEN: usize = 500;

/// Uses `IF NOT EXISTS` throughout so `apply_schema` is idempotent.
pub(crate) const SCHEMA_SQL: &str = r#"
PRAGMA journal_mode = WAL;

CREATE TABLE IF NOT EXISTS votes (
    id        INTEGER PRIMARY KEY,
    url       TEXT    NOT NULL UNIQUE,
    upvotes   INTEGER NOT NULL DEFAULT 0 CHECK (upvotes >= 0),
    downvotes INTEGER NOT NULL DEFAULT 0 CHECK (downvotes >= 0)
);
"#;

/// Apply the schema to an open connection
pub(crate) fn apply_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(SCHEMA_SQL)
}
