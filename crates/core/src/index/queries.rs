//! The textual query protocol against the vault index.
//!
//! Every lookup is a complete SQL string with its arguments interpolated,
//! handed to an [`IndexBackend`] as a single shot. Results come back as raw
//! newline-delimited text; see [`crate::lines`] for turning them into
//! candidates.

use crate::config::types::{IndexBackendKind, ResolvedConfig};

use super::backend::{IndexBackend, Sqlite3Process, SqliteBackend};

/// Escape a value for embedding in a single-quoted SQL literal.
///
/// Every `'` is doubled and nothing else is touched. This is the whole of
/// the protection against crafted link text: it keeps the value inside its
/// literal, but leaves LIKE wildcards and control characters alone. Enable
/// hardened mode on [`IndexQueries`] when that matters.
pub fn escape_for_index_query(value: &str) -> String {
    value.replace('\'', "''")
}

/// Escape LIKE wildcards so `value` only matches itself (`ESCAPE '\'`).
pub fn escape_like_pattern(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '\\' | '%' | '_') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Read-only lookups against the index.
///
/// Backend failures (no index file, missing `sqlite3`, SQL errors) are
/// logged and turned into empty output, which at this level looks exactly
/// like "no results". Use [`IndexQueries::is_available`] to tell the two
/// apart.
pub struct IndexQueries {
    backend: Box<dyn IndexBackend>,
    hardened: bool,
}

impl IndexQueries {
    pub fn new(backend: Box<dyn IndexBackend>) -> Self {
        Self { backend, hardened: false }
    }

    /// Build the backend selected in `[index]` for the configured index file.
    pub fn from_config(cfg: &ResolvedConfig) -> Self {
        let backend: Box<dyn IndexBackend> = match cfg.index.backend {
            IndexBackendKind::Sqlite => Box::new(SqliteBackend::new(&cfg.index_path)),
            IndexBackendKind::Sqlite3 => {
                Box::new(Sqlite3Process::new(&cfg.index.sqlite3_program, &cfg.index_path))
            }
        };
        Self::new(backend).hardened(cfg.index.hardened)
    }

    /// Also escape LIKE wildcards and drop NUL characters from arguments.
    pub fn hardened(mut self, hardened: bool) -> Self {
        self.hardened = hardened;
        self
    }

    pub fn is_available(&self) -> bool {
        self.backend.is_available()
    }

    /// Run a complete query, degrading any failure to empty output.
    pub fn run(&self, sql: &str) -> String {
        match self.backend.run(sql) {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!("index query failed: {}", e);
                String::new()
            }
        }
    }

    /// Files that backlinks written as `reference` point at.
    pub fn backlinks_to(&self, reference: &str) -> String {
        let sql = format!(
            "SELECT DISTINCT f.path FROM backlinks b \
             JOIN files f ON f.id = b.target_id \
             WHERE b.link = '{}' ORDER BY f.path;",
            self.literal(reference)
        );
        tracing::debug!(reference, "querying backlink targets");
        self.run(&sql)
    }

    /// Files linking to any file whose path contains the first line of
    /// `fragment_or_path`.
    pub fn backlinks_from(&self, fragment_or_path: &str) -> String {
        let fragment = crate::lines::strip_line_terminator(fragment_or_path)
            .lines()
            .next()
            .unwrap_or_default();

        let sql = if self.hardened {
            format!(
                "SELECT DISTINCT s.path FROM backlinks b \
                 JOIN files s ON s.id = b.source_id \
                 JOIN files t ON t.id = b.target_id \
                 WHERE t.path LIKE '%{}%' ESCAPE '\\' ORDER BY s.path;",
                escape_like_pattern(&self.literal(fragment))
            )
        } else {
            format!(
                "SELECT DISTINCT s.path FROM backlinks b \
                 JOIN files s ON s.id = b.source_id \
                 JOIN files t ON t.id = b.target_id \
                 WHERE t.path LIKE '%{}%' ORDER BY s.path;",
                self.literal(fragment)
            )
        };
        tracing::debug!(fragment, "querying backlinks");
        self.run(&sql)
    }

    /// Files tagged with `tag`.
    pub fn files_by_tag(&self, tag: &str) -> String {
        let sql = format!(
            "SELECT DISTINCT f.path FROM files f \
             JOIN file_tags ft ON ft.file_id = f.id \
             JOIN tags t ON t.id = ft.tag_id \
             WHERE t.name = '{}' ORDER BY f.path;",
            self.literal(tag)
        );
        self.run(&sql)
    }

    /// Every distinct tag name.
    pub fn all_tags(&self) -> String {
        self.run("SELECT DISTINCT name FROM tags ORDER BY name;")
    }

    fn literal(&self, value: &str) -> String {
        if self.hardened {
            escape_for_index_query(&value.replace('\0', ""))
        } else {
            escape_for_index_query(value)
        }
    }
}
