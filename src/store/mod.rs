//! Note, user, and session persistence backed by SQLite

mod repository;
mod schema;
mod sqlite;

pub use repository::{
    NoteRepository, SessionRepository, StoreError, StoreResult, UserRepository, UserSummary,
};
pub use schema::{SCHEMA_VERSION, create_schema};
pub use sqlite::SqliteStore;
