//! Read-only access to the vault index.
//!
//! The index is an SQLite file built by an external tool, holding the
//! vault's files, tags and backlinks. This module only queries it:
//!
//! - [`backend`]: runs one complete query and returns rows as text
//! - [`queries`]: the lookups the resolver and CLI issue
//! - [`schema`]: the table layout those lookups assume
//!
//! # Example
//!
//! ```no_run
//! use vaultnav_core::index::{IndexQueries, SqliteBackend};
//! use vaultnav_core::lines::records;
//!
//! let index = IndexQueries::new(Box::new(SqliteBackend::new("notes/.vaultnav/index.db")));
//! for path in records(&index.files_by_tag("reading")) {
//!     println!("{path}");
//! }
//! ```

pub mod backend;
pub mod queries;
pub mod schema;

use thiserror::Error;

pub use backend::{IndexBackend, Sqlite3Process, SqliteBackend};
pub use queries::{IndexQueries, escape_for_index_query, escape_like_pattern};
pub use schema::{INDEX_SCHEMA, INDEX_TABLES};

/// Location of the index relative to the vault root.
pub const INDEX_FILE: &str = ".vaultnav/index.db";

#[derive(Debug, Error)]
pub enum IndexError {
    #[error("index not found at {0}")]
    Missing(String),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{program} exited with {status}: {stderr}")]
    Process { program: String, status: String, stderr: String },
}
