//! Repository traits and error types for note and user persistence.

use crate::domain::{Note, NoteDraft, NoteId, NoteQuery, User, UserId, Username};
use chrono::{DateTime, Utc};
use std::path::PathBuf;
use thiserror::Error;

// ===========================================
// StoreError Type
// ===========================================

/// Errors that can occur during store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The requested note does not exist.
    #[error("note not found: {id}")]
    NoteNotFound { id: NoteId },

    /// The requested user does not exist.
    #[error("user not found: {username}")]
    UserNotFound { username: String },

    /// Another account already uses this username.
    #[error("username already taken: {username}")]
    UsernameTaken { username: String },

    /// A database error occurred.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A stored value could not be decoded.
    #[error("corrupt row: {0}")]
    Corrupt(String),

    /// An I/O error occurred.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

// ===========================================
// UserSummary
// ===========================================

/// A user together with how many notes they own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserSummary {
    user: User,
    note_count: usize,
}

impl UserSummary {
    pub fn new(user: User, note_count: usize) -> Self {
        Self { user, note_count }
    }

    pub fn user(&self) -> &User {
        &self.user
    }

    pub fn note_count(&self) -> usize {
        self.note_count
    }
}

// ===========================================
// Repository Traits
// ===========================================

/// Persistence operations for notes.
///
/// Ownership is not checked here. Callers apply
/// [`Note::ensure_owned_by`](crate::domain::Note::ensure_owned_by) before
/// exposing or mutating a note on behalf of a user.
pub trait NoteRepository {
    /// Inserts a note authored by `author`, stamping both timestamps with `at`.
    fn create_note(
        &mut self,
        author: UserId,
        draft: &NoteDraft,
        at: DateTime<Utc>,
    ) -> StoreResult<Note>;

    /// Retrieves a note by id.
    fn get_note(&self, id: NoteId) -> StoreResult<Option<Note>>;

    /// Replaces title and content and refreshes `updated`.
    ///
    /// Author and creation time are never touched.
    fn update_note(
        &mut self,
        id: NoteId,
        draft: &NoteDraft,
        at: DateTime<Utc>,
    ) -> StoreResult<Note>;

    /// Deletes a note. Returns `false` if no such note existed.
    fn delete_note(&mut self, id: NoteId) -> StoreResult<bool>;

    /// Lists the notes selected by `query`, newest first.
    fn list_notes(&self, query: &NoteQuery) -> StoreResult<Vec<Note>>;

    /// Counts all notes authored by `owner`.
    fn count_notes(&self, owner: UserId) -> StoreResult<usize>;
}

/// Persistence operations for user accounts.
pub trait UserRepository {
    /// Inserts a new user.
    ///
    /// Fails with [`StoreError::UsernameTaken`] if the name is in use.
    fn create_user(
        &mut self,
        username: &Username,
        password_hash: &str,
        at: DateTime<Utc>,
    ) -> StoreResult<User>;

    /// Retrieves a user by id.
    fn get_user(&self, id: UserId) -> StoreResult<Option<User>>;

    /// Retrieves a user by exact username.
    fn find_user(&self, username: &str) -> StoreResult<Option<User>>;

    /// Stamps the user's last successful login.
    fn record_login(&mut self, id: UserId, at: DateTime<Utc>) -> StoreResult<()>;

    /// Deletes a user and, by cascade, every note they authored.
    ///
    /// Returns `false` if no such user existed.
    fn delete_user(&mut self, username: &str) -> StoreResult<bool>;

    /// Lists all users ordered by username, with their note counts.
    fn list_users(&self) -> StoreResult<Vec<UserSummary>>;
}

/// Persistence for login sessions.
///
/// Session payloads are opaque strings to the store; only the id and
/// expiry are interpreted.
pub trait SessionRepository {
    /// Inserts a new session. Returns `false` if the id is already taken.
    fn insert_session(
        &mut self,
        id: &str,
        data: &str,
        expires: DateTime<Utc>,
    ) -> StoreResult<bool>;

    /// Inserts or replaces a session.
    fn save_session(&mut self, id: &str, data: &str, expires: DateTime<Utc>) -> StoreResult<()>;

    /// Returns the payload of a session that has not expired by `now`.
    fn load_session(&self, id: &str, now: DateTime<Utc>) -> StoreResult<Option<String>>;

    /// Deletes a session. Returns `false` if no such session existed.
    fn delete_session(&mut self, id: &str) -> StoreResult<bool>;

    /// Deletes every session that expired at or before `now`.
    fn delete_expired_sessions(&mut self, now: DateTime<Utc>) -> StoreResult<usize>;
}
