//! Command handlers for the CLI.

mod serve;
mod users;


use anyhow::{Context, Result};
use std::path::Path;

use crate::auth::{Argon2Hasher, HashingConfig};
use crate::store::SqliteStore;

// Re-export public items
pub use serve::handle_serve;
pub use users::{create_account, handle_adduser, handle_deluser, handle_users, write_users};

// ===========================================
// Shared Utilities
// ===========================================

/// Opens the database, creating it and its schema if needed.
pub(crate) fn open_store(db_path: &Path) -> Result<SqliteStore> {
    SqliteStore::open(db_path)
        .with_context(|| format!("failed to open database at {}", db_path.display()))
}

/// Builds the password hasher from the configured costs.
pub(crate) fn build_hasher(config: &HashingConfig) -> Result<Argon2Hasher> {
    Argon2Hasher::new(config).context("invalid [password_hashing] configuration")
}
