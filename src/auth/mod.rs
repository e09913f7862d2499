//! Password hashing and session-backed login state

mod hasher;
mod session;
mod session_store;

pub use hasher::{Argon2Hasher, HashError, Hasher, HashingConfig};
pub use session::{SESSION_USER_ID_KEY, end_session, session_user, start_session};
pub use session_store::SqliteSessionStore;
