//! Connection management for SqliteStore.

use super::SqliteStore;
use crate::domain::contains_ignore_case;
use crate::store::{StoreError, StoreResult, create_schema};
use log::debug;
use rusqlite::Connection;
use rusqlite::functions::FunctionFlags;
use std::fs;
use std::path::Path;

impl SqliteStore {
    // ===========================================
    // In-Memory Connection
    // ===========================================

    /// Opens an in-memory SQLite database with the store schema.
    ///
    /// Useful for tests; nothing survives the connection.
    pub fn open_in_memory() -> StoreResult<Self> {
        let conn = Connection::open_in_memory()?;
        Self::init(conn)
    }

    // ===========================================
    // File-Based Connection
    // ===========================================

    /// Opens or creates a SQLite database at the given path.
    ///
    /// Creates parent directories if they don't exist. Initializes the schema
    /// if this is a new database.
    pub fn open(path: &Path) -> StoreResult<Self> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            fs::create_dir_all(parent).map_err(|e| StoreError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        debug!("opening database at {}", path.display());
        let conn = Connection::open(path)?;
        Self::init(conn)
    }

    fn init(conn: Connection) -> StoreResult<Self> {
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        register_functions(&conn)?;
        create_schema(&conn)?;
        Ok(Self { conn })
    }

    // ===========================================
    // Connection Accessors
    // ===========================================

    /// Returns a reference to the underlying SQLite connection.
    pub fn conn(&self) -> &Connection {
        &self.conn
    }
}

/// Registers `icontains(haystack, needle)`, the Unicode-aware substring
/// match used by note search. NULL on either side never matches.
fn register_functions(conn: &Connection) -> rusqlite::Result<()> {
    conn.create_scalar_function(
        "icontains",
        2,
        FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
        |ctx| {
            let haystack = ctx.get::<Option<String>>(0)?;
            let needle = ctx.get::<Option<String>>(1)?;
            Ok(match (haystack, needle) {
                (Some(h), Some(n)) => contains_ignore_case(&h, &n),
                _ => false,
            })
        },
    )
}
