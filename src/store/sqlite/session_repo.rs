//! SessionRepository implementation for SqliteStore.

use super::{SqliteStore, encode_timestamp};
use crate::store::{SessionRepository, StoreResult};
use chrono::{DateTime, Utc};
use rusqlite::{OptionalExtension, params};

impl SessionRepository for SqliteStore {
    fn insert_session(
        &mut self,
        id: &str,
        data: &str,
        expires: DateTime<Utc>,
    ) -> StoreResult<bool> {
        let inserted = self.conn.execute(
            "INSERT OR IGNORE INTO sessions (id, data, expiry_date) VALUES (?1, ?2, ?3)",
            params![id, data, encode_timestamp(expires)],
        )?;
        Ok(inserted == 1)
    }

    fn save_session(&mut self, id: &str, data: &str, expires: DateTime<Utc>) -> StoreResult<()> {
        self.conn.execute(
            "INSERT INTO sessions (id, data, expiry_date) VALUES (?1, ?2, ?3)
             ON CONFLICT(id) DO UPDATE
             SET data = excluded.data, expiry_date = excluded.expiry_date",
            params![id, data, encode_timestamp(expires)],
        )?;
        Ok(())
    }

    fn load_session(&self, id: &str, now: DateTime<Utc>) -> StoreResult<Option<String>> {
        let data = self
            .conn
            .query_row(
                "SELECT data FROM sessions WHERE id = ?1 AND expiry_date > ?2",
                params![id, encode_timestamp(now)],
                |row| row.get(0),
            )
            .optional()?;
        Ok(data)
    }

    fn delete_session(&mut self, id: &str) -> StoreResult<bool> {
        let deleted = self.conn.execute("DELETE FROM sessions WHERE id = ?1", [id])?;
        Ok(deleted > 0)
    }

    fn delete_expired_sessions(&mut self, now: DateTime<Utc>) -> StoreResult<usize> {
        let deleted = self.conn.execute(
            "DELETE FROM sessions WHERE expiry_date <= ?1",
            [encode_timestamp(now)],
        )?;
        Ok(deleted)
    }
}
