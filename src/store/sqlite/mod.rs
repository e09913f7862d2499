//! SQLite-backed store implementation.

mod connection;
mod note_repo;
mod session_repo;
mod user_repo;


use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::Connection;

use crate::store::{StoreError, StoreResult};

// ===========================================
// SqliteStore Struct
// ===========================================

/// SQLite-backed store for users, notes, and sessions.
///
/// Owns a single connection. Every write is one statement, so SQLite's
/// implicit per-statement transaction makes it atomic.
pub struct SqliteStore {
    pub(crate) conn: Connection,
}

// ===========================================
// Timestamp Encoding
// ===========================================

/// Encodes a timestamp so that text order matches time order.
pub(crate) fn encode_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub(crate) fn decode_timestamp(column: &str, value: &str) -> StoreResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            StoreError::Corrupt(format!("invalid {} timestamp '{}': {}", column, value, e))
        })
}
