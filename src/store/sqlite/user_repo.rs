//! UserRepository implementation for SqliteStore.

use super::{SqliteStore, decode_timestamp, encode_timestamp};
use crate::domain::{User, UserId, Username};
use crate::store::{StoreError, StoreResult, UserRepository, UserSummary};
use chrono::{DateTime, Utc};
use rusqlite::{ErrorCode, OptionalExtension, Row, params};

const USER_COLUMNS: &str = "id, username, password_hash, date_joined, last_login";

struct UserRow {
    id: i64,
    username: String,
    password_hash: String,
    date_joined: String,
    last_login: Option<String>,
}

impl UserRow {
    fn read(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            username: row.get(1)?,
            password_hash: row.get(2)?,
            date_joined: row.get(3)?,
            last_login: row.get(4)?,
        })
    }

    fn into_user(self) -> StoreResult<User> {
        let username = Username::new(&self.username).map_err(|e| {
            StoreError::Corrupt(format!("invalid username '{}': {}", self.username, e))
        })?;
        let date_joined = decode_timestamp("date_joined", &self.date_joined)?;
        let last_login = self
            .last_login
            .as_deref()
            .map(|value| decode_timestamp("last_login", value))
            .transpose()?;
        Ok(User::from_parts(
            UserId::new(self.id),
            username,
            self.password_hash,
            date_joined,
            last_login,
        ))
    }
}

fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _)
            if e.code == ErrorCode::ConstraintViolation
                && e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
    )
}

impl UserRepository for SqliteStore {
    fn create_user(
        &mut self,
        username: &Username,
        password_hash: &str,
        at: DateTime<Utc>,
    ) -> StoreResult<User> {
        let result = self.conn.execute(
            "INSERT INTO users (username, password_hash, date_joined) VALUES (?1, ?2, ?3)",
            params![username.as_str(), password_hash, encode_timestamp(at)],
        );
        match result {
            Ok(_) => {}
            Err(e) if is_unique_violation(&e) => {
                return Err(StoreError::UsernameTaken {
                    username: username.to_string(),
                });
            }
            Err(e) => return Err(e.into()),
        }

        let id = UserId::new(self.conn.last_insert_rowid());
        self.get_user(id)?.ok_or_else(|| StoreError::UserNotFound {
            username: username.to_string(),
        })
    }

    fn get_user(&self, id: UserId) -> StoreResult<Option<User>> {
        self.conn
            .query_row(
                &format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?1"),
                [id.get()],
                UserRow::read,
            )
            .optional()?
            .map(UserRow::into_user)
            .transpose()
    }

    fn find_user(&self, username: &str) -> StoreResult<Option<User>> {
        self.conn
            .query_row(
                &format!("SELECT {USER_COLUMNS} FROM users WHERE username = ?1"),
                [username],
                UserRow::read,
            )
            .optional()?
            .map(UserRow::into_user)
            .transpose()
    }

    fn record_login(&mut self, id: UserId, at: DateTime<Utc>) -> StoreResult<()> {
        self.conn.execute(
            "UPDATE users SET last_login = ?1 WHERE id = ?2",
            params![encode_timestamp(at), id.get()],
        )?;
        Ok(())
    }

    fn delete_user(&mut self, username: &str) -> StoreResult<bool> {
        let rows = self
            .conn
            .execute("DELETE FROM users WHERE username = ?1", [username])?;
        Ok(rows > 0)
    }

    fn list_users(&self) -> StoreResult<Vec<UserSummary>> {
        let mut stmt = self.conn.prepare(
            "SELECT u.id, u.username, u.password_hash, u.date_joined, u.last_login,
                    (SELECT COUNT(*) FROM notes n WHERE n.author_id = u.id)
             FROM users u
             ORDER BY u.username",
        )?;

        let rows = stmt
            .query_map([], |row| Ok((UserRow::read(row)?, row.get::<_, i64>(5)?)))?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        rows.into_iter()
            .map(|(row, count)| Ok(UserSummary::new(row.into_user()?, count as usize)))
            .collect()
    }
}
