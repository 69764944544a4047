//! Layout of the vault index.
//!
//! The index is produced by an external tool and only ever read here. The
//! DDL below describes the tables the queries rely on; it is used to build
//! test fixtures and by `doctor` to report an index that lacks them.

use std::path::Path;

use rusqlite::{Connection, OpenFlags};

use super::IndexError;

/// Tables every query in [`super::queries`] expects.
pub const INDEX_TABLES: [&str; 4] = ["files", "tags", "file_tags", "backlinks"];

pub const INDEX_SCHEMA: &str = r#"
    -- One row per note or asset, path relative to the vault root
    CREATE TABLE IF NOT EXISTS files (
        id INTEGER PRIMARY KEY,
        path TEXT NOT NULL UNIQUE
    );

    CREATE TABLE IF NOT EXISTS tags (
        id INTEGER PRIMARY KEY,
        name TEXT NOT NULL UNIQUE
    );

    CREATE TABLE IF NOT EXISTS file_tags (
        file_id INTEGER NOT NULL REFERENCES files(id) ON DELETE CASCADE,
        tag_id INTEGER NOT NULL REFERENCES tags(id) ON DELETE CASCADE,
        PRIMARY KEY (file_id, tag_id)
    );

    -- `link` is the text between [[ and ]] as written in the source note
    CREATE TABLE IF NOT EXISTS backlinks (
        id INTEGER PRIMARY KEY,
        source_id INTEGER NOT NULL REFERENCES files(id) ON DELETE CASCADE,
        target_id INTEGER NOT NULL REFERENCES files(id) ON DELETE CASCADE,
        link TEXT NOT NULL
    );

    CREATE INDEX IF NOT EXISTS idx_backlinks_link ON backlinks(link);
    CREATE INDEX IF NOT EXISTS idx_backlinks_target ON backlinks(target_id);
"#;

/// Create the index tables on `conn`. Idempotent.
pub fn create_schema(conn: &Connection) -> Result<(), IndexError> {
    conn.execute_batch(INDEX_SCHEMA)?;
    Ok(())
}

/// Names of expected tables absent from `conn`.
pub fn missing_tables(conn: &Connection) -> Result<Vec<&'static str>, IndexError> {
    let mut stmt = conn.prepare(
        "SELECT COUNT(*) > 0 FROM sqlite_master WHERE type = 'table' AND name = ?1",
    )?;

    let mut missing = Vec::new();
    for table in INDEX_TABLES {
        let exists: bool = stmt.query_row([table], |row| row.get(0))?;
        if !exists {
            missing.push(table);
        }
    }
    Ok(missing)
}

/// Open the index at `path` read-only and list the tables it lacks.
pub fn inspect(path: &Path) -> Result<Vec<&'static str>, IndexError> {
    if !path.is_file() {
        return Err(IndexError::Missing(path.display().to_string()));
    }
    let conn = Connection::open_with_flags(path, OpenFlags::SQLITE_OPEN_READ_ONLY)?;
    missing_tables(&conn)
}
