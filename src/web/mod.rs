//! HTTP application: routes, shared state, and request logging.

mod account;
mod error;
mod extract;
mod notes;
pub mod templates;
mod views;

use std::sync::{Arc, Mutex};
use std::time::Instant;

use axum::Router;
use axum::extract::Request;
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::get;
use log::info;
use tower_sessions::cookie::SameSite;
use tower_sessions::{Expiry, SessionManagerLayer};

use crate::auth::{Hasher, SqliteSessionStore};
use crate::store::{SqliteStore, StoreResult};

pub use error::{AppError, found, login_url};
pub use extract::{AuthUser, LenientForm, LenientQuery, safe_next};
pub use views::NoteView;

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "sessionid";

// ===========================================
// Shared State
// ===========================================

/// State shared by all handlers.
///
/// The store sits behind a mutex; locks are taken per store call through
/// [`AppState::with_store`] and never held across an await.
#[derive(Clone)]
pub struct AppState {
    store: Arc<Mutex<SqliteStore>>,
    hasher: Arc<dyn Hasher>,
}

impl AppState {
    pub fn new(store: SqliteStore, hasher: Arc<dyn Hasher>) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
            hasher,
        }
    }

    /// Runs `f` with exclusive access to the store.
    pub fn with_store<T>(
        &self,
        f: impl FnOnce(&mut SqliteStore) -> StoreResult<T>,
    ) -> Result<T, AppError> {
        let mut store = self
            .store
            .lock()
            .map_err(|_| AppError::Internal("store mutex poisoned".to_string()))?;
        Ok(f(&mut store)?)
    }

    pub fn hasher(&self) -> Arc<dyn Hasher> {
        Arc::clone(&self.hasher)
    }

    /// A session store over the same database connection.
    pub fn session_store(&self) -> SqliteSessionStore {
        SqliteSessionStore::new(Arc::clone(&self.store))
    }
}

// ===========================================
// Router
// ===========================================

/// Session cookie settings.
#[derive(Debug, Clone, Copy)]
pub struct SessionSettings {
    /// Only send the cookie over HTTPS.
    pub secure: bool,
    /// Days of inactivity before the session expires.
    pub days: i64,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            secure: false,
            days: 14,
        }
    }
}

/// Builds the application router.
pub fn router(state: AppState, sessions: SessionSettings) -> Router {
    let session_layer = SessionManagerLayer::new(state.session_store())
        .with_name(SESSION_COOKIE)
        .with_secure(sessions.secure)
        .with_same_site(SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(time::Duration::days(sessions.days)));

    Router::new()
        .route("/", get(notes::index))
        .route("/add/", get(notes::add_form).post(notes::add_submit))
        .route("/note/{id}/", get(notes::single))
        .route(
            "/note/edit/{id}/",
            get(notes::edit_form).post(notes::edit_submit),
        )
        .route(
            "/note/delete/{id}/",
            get(notes::delete_confirm).post(notes::delete_submit),
        )
        .route(
            "/user/login/",
            get(account::login_form).post(account::login_submit),
        )
        .route("/user/logout/", get(account::logout))
        .route(
            "/user/signup/",
            get(account::signup_form).post(account::signup_submit),
        )
        .fallback(not_found)
        .layer(session_layer)
        .layer(middleware::from_fn(log_requests))
        .with_state(state)
}

async fn not_found() -> AppError {
    AppError::NotFound
}

async fn log_requests(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let started = Instant::now();

    let response = next.run(request).await;

    info!(
        "{} {} {} {:.1}ms",
        method,
        path,
        response.status().as_u16(),
        started.elapsed().as_secs_f64() * 1000.0
    );
    response
}
