//! Request-level errors and their HTTP responses.

use axum::http::{StatusCode, header};
use axum::response::{Html, IntoResponse, Response};
use log::error;
use minijinja::context;
use thiserror::Error;

use crate::auth::HashError;
use crate::domain::AccessDenied;
use crate::store::StoreError;
use crate::web::templates::render;

/// Everything a handler can fail with.
#[derive(Debug, Error)]
pub enum AppError {
    /// Unknown route, malformed id, or missing note.
    #[error("not found")]
    NotFound,

    /// Authenticated, but not the note's author.
    #[error(transparent)]
    PermissionDenied(#[from] AccessDenied),

    /// No authenticated user; `next` is the path to return to after login.
    #[error("login required to access {next}")]
    LoginRequired { next: String },

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("session store error: {0}")]
    Session(#[from] tower_sessions::session::Error),

    #[error("template error: {0}")]
    Template(#[from] minijinja::Error),

    #[error(transparent)]
    Hash(#[from] HashError),

    #[error("{0}")]
    Internal(String),
}

/// Login page URL that sends the user back to `next` afterwards.
///
/// `next` is percent-encoded except for `/`, so `/note/3/` stays readable.
pub fn login_url(next: &str) -> String {
    let encoded = urlencoding::encode(next).replace("%2F", "/");
    format!("/user/login/?next={encoded}")
}

/// A `302 Found` redirect.
pub fn found(location: &str) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location.to_string())]).into_response()
}

fn error_page(status: StatusCode, template: &str) -> Response {
    match render(template, context! {}) {
        Ok(body) => (status, Html(body)).into_response(),
        Err(e) => {
            error!("failed to render {}: {}", template, e);
            status.into_response()
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::NotFound | AppError::Store(StoreError::NoteNotFound { .. }) => {
                error_page(StatusCode::NOT_FOUND, "404.html")
            }
            AppError::PermissionDenied(denied) => {
                log::warn!("{}", denied);
                error_page(StatusCode::FORBIDDEN, "403.html")
            }
            AppError::LoginRequired { next } => found(&login_url(&next)),
            other => {
                error!("request failed: {}", other);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
            }
        }
    }
}
