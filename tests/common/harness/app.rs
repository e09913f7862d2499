//! In-process HTTP client for the web application.

#![allow(dead_code)]

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use scribe::auth::{Argon2Hasher, Hasher, HashingConfig};
use scribe::domain::{Note, NoteDraft, NoteId, User, UserId, Username};
use scribe::store::{NoteRepository, SqliteStore, UserRepository};
use scribe::web::{AppState, SESSION_COOKIE, SessionSettings, router};
use std::path::Path;
use std::sync::Arc;
use tower::ServiceExt;

/// Password given to every user created through [`TestApp::create_user`].
pub const TEST_PASSWORD: &str = "test_password";

/// A response with its body already collected.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub location: Option<String>,
    pub body: String,
}

impl TestResponse {
    /// Asserts a `302 Found` to `location`.
    pub fn assert_redirect(&self, location: &str) {
        assert_eq!(self.status, StatusCode::FOUND, "body: {}", self.body);
        assert_eq!(self.location.as_deref(), Some(location));
    }

    pub fn assert_ok(&self) {
        assert_eq!(self.status, StatusCode::OK, "location: {:?}", self.location);
    }
}

/// The application router backed by a database (in memory by default), plus a
/// one-cookie jar holding the current session.
pub struct TestApp {
    router: Router,
    state: AppState,
    hasher: Arc<Argon2Hasher>,
    session: Option<String>,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_store(SqliteStore::open_in_memory().expect("Failed to open store"))
    }

    /// An app over a database file, so several apps can share one database.
    pub fn open(path: &Path) -> Self {
        Self::with_store(SqliteStore::open(path).expect("Failed to open store"))
    }

    fn with_store(store: SqliteStore) -> Self {
        let hasher = Arc::new(
            Argon2Hasher::new(&HashingConfig::fast_insecure()).expect("Failed to build hasher"),
        );
        let state = AppState::new(store, hasher.clone());
        Self {
            router: router(state.clone(), SessionSettings::default()),
            state,
            hasher,
            session: None,
        }
    }

    /// The session cookie value currently held, if any.
    pub fn session_id(&self) -> Option<&str> {
        self.session.as_deref()
    }

    /// Replaces the held session cookie, e.g. to replay an old one.
    pub fn use_session(&mut self, id: &str) {
        self.session = Some(id.to_string());
    }

    /// Forgets the session cookie, as a fresh browser would.
    pub fn clear_cookies(&mut self) {
        self.session = None;
    }

    // ===========================================
    // Direct Store Access
    // ===========================================

    /// Creates a user with [`TEST_PASSWORD`].
    pub fn create_user(&self, username: &str) -> User {
        let username = Username::new(username).expect("invalid username");
        let hash = self
            .hasher
            .generate_hash(TEST_PASSWORD)
            .expect("Failed to hash password");
        self.state
            .with_store(|store| store.create_user(&username, &hash, chrono::Utc::now()))
            .expect("Failed to create user")
    }

    /// Creates a note authored by `author`.
    pub fn create_note(&self, author: UserId, title: &str, content: &str) -> Note {
        let draft = NoteDraft::new(title, Some(content)).expect("invalid note");
        self.state
            .with_store(|store| store.create_note(author, &draft, chrono::Utc::now()))
            .expect("Failed to create note")
    }

    pub fn get_note(&self, id: NoteId) -> Option<Note> {
        self.state
            .with_store(|store| store.get_note(id))
            .expect("Failed to read note")
    }

    pub fn count_notes(&self, owner: UserId) -> usize {
        self.state
            .with_store(|store| store.count_notes(owner))
            .expect("Failed to count notes")
    }

    pub fn find_user(&self, username: &str) -> Option<User> {
        self.state
            .with_store(|store| store.find_user(username))
            .expect("Failed to read user")
    }

    pub fn delete_user(&self, username: &str) {
        self.state
            .with_store(|store| store.delete_user(username))
            .expect("Failed to delete user");
    }

    // ===========================================
    // Requests
    // ===========================================

    pub async fn get(&mut self, uri: &str) -> TestResponse {
        let request = self.request("GET", uri).body(Body::empty()).unwrap();
        self.send(request).await
    }

    /// Posts an urlencoded form.
    pub async fn post(&mut self, uri: &str, fields: &[(&str, &str)]) -> TestResponse {
        let body = fields
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&");
        let request = self
            .request("POST", uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body))
            .unwrap();
        self.send(request).await
    }

    /// Logs in through the login form and expects success.
    pub async fn login(&mut self, username: &str) {
        let response = self
            .post(
                "/user/login/",
                &[("username", username), ("password", TEST_PASSWORD)],
            )
            .await;
        response.assert_redirect("/");
    }

    /// Creates a user and logs in as them.
    pub async fn login_as_new_user(&mut self, username: &str) -> User {
        let user = self.create_user(username);
        self.login(username).await;
        user
    }

    fn request(&self, method: &str, uri: &str) -> axum::http::request::Builder {
        let builder = Request::builder().method(method).uri(uri);
        match &self.session {
            Some(id) => builder.header(header::COOKIE, format!("{SESSION_COOKIE}={id}")),
            None => builder,
        }
    }

    async fn send(&mut self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");

        for value in response.headers().get_all(header::SET_COOKIE) {
            let cookie = value.to_str().expect("non-ascii cookie");
            self.store_cookie(cookie);
        }

        let status = response.status();
        let location = response
            .headers()
            .get(header::LOCATION)
            .map(|v| v.to_str().unwrap().to_string());
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        TestResponse {
            status,
            location,
            body: String::from_utf8(bytes.to_vec()).unwrap(),
        }
    }

    fn store_cookie(&mut self, set_cookie: &str) {
        let pair = set_cookie.split(';').next().unwrap_or_default();
        let Some((name, value)) = pair.split_once('=') else {
            return;
        };
        if name.trim() != SESSION_COOKIE {
            return;
        }
        let expired = value.is_empty() || set_cookie.contains("Max-Age=0");
        self.session = if expired {
            None
        } else {
            Some(value.to_string())
        };
    }
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}
