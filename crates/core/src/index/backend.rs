//! Single-shot query execution against the index file.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::time::Duration;

use rusqlite::types::ValueRef;
use rusqlite::{Connection, OpenFlags};

use super::IndexError;

/// Runs one complete query string and returns its rows as text.
///
/// Output follows `sqlite3` list mode: columns joined with `|`, every row
/// terminated by `\n`, NULL rendered as an empty string.
pub trait IndexBackend {
    fn run(&self, sql: &str) -> Result<String, IndexError>;

    /// Whether the index behind this backend exists at all.
    fn is_available(&self) -> bool;
}

/// In-process backend: opens the index read-only for every query.
#[derive(Debug, Clone)]
pub struct SqliteBackend {
    path: PathBuf,
}

impl SqliteBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl IndexBackend for SqliteBackend {
    fn run(&self, sql: &str) -> Result<String, IndexError> {
        if !self.is_available() {
            return Err(IndexError::Missing(self.path.display().to_string()));
        }

        let conn = Connection::open_with_flags(
            &self.path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;
        conn.busy_timeout(Duration::from_millis(5000))?;

        let mut stmt = conn.prepare(sql)?;
        let columns = stmt.column_count();
        let mut rows = stmt.query([])?;

        let mut out = String::new();
        while let Some(row) = rows.next()? {
            for i in 0..columns {
                if i > 0 {
                    out.push('|');
                }
                push_value(&mut out, row.get_ref(i)?);
            }
            out.push('\n');
        }
        Ok(out)
    }

    fn is_available(&self) -> bool {
        self.path.is_file()
    }
}

fn push_value(out: &mut String, value: ValueRef<'_>) {
    match value {
        ValueRef::Null => {}
        ValueRef::Integer(i) => out.push_str(&i.to_string()),
        ValueRef::Real(f) => out.push_str(&f.to_string()),
        ValueRef::Text(bytes) | ValueRef::Blob(bytes) => {
            out.push_str(&String::from_utf8_lossy(bytes))
        }
    }
}

/// Backend that shells out to the `sqlite3` command-line shell.
#[derive(Debug, Clone)]
pub struct Sqlite3Process {
    program: String,
    path: PathBuf,
}

impl Sqlite3Process {
    pub fn new(program: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self { program: program.into(), path: path.into() }
    }
}

impl IndexBackend for Sqlite3Process {
    fn run(&self, sql: &str) -> Result<String, IndexError> {
        // sqlite3 would happily create an empty database in its place.
        if !self.is_available() {
            return Err(IndexError::Missing(self.path.display().to_string()));
        }

        let output = Command::new(&self.program)
            .arg(&self.path)
            .arg(sql)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| IndexError::Spawn { program: self.program.clone(), source: e })?;

        if !output.status.success() {
            return Err(IndexError::Process {
                program: self.program.clone(),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    fn is_available(&self) -> bool {
        self.path.is_file()
    }
}
