//! Request extractors.

use axum::Form;
use axum::extract::{FromRequest, FromRequestParts, Query, Request};
use axum::http::StatusCode;
use axum::http::request::Parts;
use axum::response::{IntoResponse, Response};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tower_sessions::Session;

use crate::auth::{end_session, session_user};
use crate::domain::User;
use crate::store::UserRepository;
use crate::web::{AppError, AppState};

/// The logged-in user making the request.
///
/// Rejects with [`AppError::LoginRequired`] (a redirect to the login page
/// carrying the original path and query) when no user is bound to the
/// session, or when the bound user no longer exists.
pub struct AuthUser {
    pub user: User,
    pub session: Session,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let session = Session::from_request_parts(parts, state)
            .await
            .map_err(|(_, msg)| AppError::Internal(msg.to_string()))?;

        let next = parts
            .uri
            .path_and_query()
            .map(|pq| pq.as_str().to_string())
            .unwrap_or_else(|| "/".to_string());

        let Some(user_id) = session_user(&session).await? else {
            return Err(AppError::LoginRequired { next });
        };

        match state.with_store(|store| store.get_user(user_id))? {
            Some(user) => Ok(Self { user, session }),
            None => {
                end_session(&session).await?;
                Err(AppError::LoginRequired { next })
            }
        }
    }
}

/// An urlencoded body decoded into `T`, where a repeated field keeps its
/// last value instead of rejecting the request.
pub struct LenientForm<T>(pub T);

impl<T, S> FromRequest<S> for LenientForm<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Form(pairs) = Form::<Vec<(String, String)>>::from_request(req, state)
            .await
            .map_err(IntoResponse::into_response)?;
        last_values(pairs).map(Self)
    }
}

/// A query string decoded into `T`, where a repeated parameter keeps its
/// last value instead of rejecting the request.
pub struct LenientQuery<T>(pub T);

impl<T, S> FromRequestParts<S> for LenientQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(pairs) = Query::<Vec<(String, String)>>::from_request_parts(parts, state)
            .await
            .map_err(IntoResponse::into_response)?;
        last_values(pairs).map(Self)
    }
}

/// Collapses repeated keys to their last value, then decodes `T`.
fn last_values<T: DeserializeOwned>(pairs: Vec<(String, String)>) -> Result<T, Response> {
    let fields: Map<String, Value> = pairs
        .into_iter()
        .map(|(key, value)| (key, Value::String(value)))
        .collect();
    serde_json::from_value(Value::Object(fields))
        .map_err(|e| (StatusCode::BAD_REQUEST, format!("invalid form data: {e}")).into_response())
}

/// Returns `next` if it is a path on this site, so redirects cannot leave it.
pub fn safe_next(next: &str) -> Option<&str> {
    let local = next.starts_with('/')
        && !next.starts_with("//")
        && !next.starts_with("/\\")
        && !next.chars().any(char::is_control);
    local.then_some(next)
}
