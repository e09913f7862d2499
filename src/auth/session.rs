//! Session keys and helpers for starting and ending a login session.

use crate::domain::UserId;
use tower_sessions::Session;
use tower_sessions::session::Error;

/// Key under which the authenticated user's id is stored.
pub const SESSION_USER_ID_KEY: &str = "user_id";

/// Binds `user` to the session under a fresh session id.
pub async fn start_session(session: &Session, user: UserId) -> Result<(), Error> {
    session.cycle_id().await?;
    session.insert(SESSION_USER_ID_KEY, user).await
}

/// Drops all session data and invalidates the session id.
pub async fn end_session(session: &Session) -> Result<(), Error> {
    session.flush().await
}

/// Returns the user bound to the session, if any.
pub async fn session_user(session: &Session) -> Result<Option<UserId>, Error> {
    session.get(SESSION_USER_ID_KEY).await
}
