//! Account handlers: login, logout, signup.

use axum::extract::State;
use axum::response::{Html, IntoResponse, Response};
use chrono::Utc;
use log::{info, warn};
use minijinja::context;
use serde::Deserialize;
use tower_sessions::Session;

use crate::auth::{end_session, start_session};
use crate::domain::{FormErrors, LoginForm, SignupForm};
use crate::store::{StoreError, UserRepository};
use crate::web::templates::page;
use crate::web::{
    AppError, AppState, AuthUser, LenientForm, LenientQuery, found, safe_next,
};

const INVALID_LOGIN: &str =
    "Please enter a correct username and password. Note that both fields may be case-sensitive.";
const USERNAME_TAKEN: &str = "A user with that username already exists.";

/// Query string of the login page.
#[derive(Debug, Default, Deserialize)]
pub struct LoginParams {
    #[serde(default)]
    pub next: String,
}

/// Runs a blocking password hash operation off the async executor.
async fn blocking<T: Send + 'static>(
    f: impl FnOnce() -> T + Send + 'static,
) -> Result<T, AppError> {
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| AppError::Internal(format!("hashing task failed: {e}")))
}

// ===========================================
// Login / Logout
// ===========================================

fn render_login(form: &LoginForm, errors: &FormErrors) -> Result<Html<String>, AppError> {
    Ok(page("login.html", context! { form => form, errors => errors })?)
}

pub async fn login_form(
    session: Session,
    LenientQuery(params): LenientQuery<LoginParams>,
) -> Result<Html<String>, AppError> {
    end_session(&session).await?;
    let form = LoginForm {
        next: params.next,
        ..LoginForm::default()
    };
    render_login(&form, &FormErrors::new())
}

pub async fn login_submit(
    session: Session,
    State(state): State<AppState>,
    LenientForm(form): LenientForm<LoginForm>,
) -> Result<Response, AppError> {
    end_session(&session).await?;

    let (username, password) = match form.validate() {
        Ok(credentials) => credentials,
        Err(errors) => return Ok(render_login(&form, &errors)?.into_response()),
    };

    let user = state.with_store(|store| store.find_user(&username))?;
    let hasher = state.hasher();
    let stored_hash = user.as_ref().map(|u| u.password_hash().to_string());
    let verified = blocking(move || match stored_hash {
        Some(hash) => hasher.check_hash(&hash, &password),
        None => {
            // Same cost as a real check so unknown names are not revealed by timing.
            let _ = hasher.generate_hash(&password);
            false
        }
    })
    .await?;

    let user = match user {
        Some(user) if verified => user,
        _ => {
            warn!("failed login for {:?}", username);
            let mut errors = FormErrors::new();
            errors.add_non_field(INVALID_LOGIN);
            return Ok(render_login(&form, &errors)?.into_response());
        }
    };

    start_session(&session, user.id()).await?;
    state.with_store(|store| store.record_login(user.id(), Utc::now()))?;
    info!("user {} logged in", user.username());

    Ok(found(safe_next(&form.next).unwrap_or("/")))
}

pub async fn logout(auth: AuthUser) -> Result<Response, AppError> {
    end_session(&auth.session).await?;
    info!("user {} logged out", auth.user.username());
    Ok(found("/"))
}

// ===========================================
// Signup
// ===========================================

fn render_signup(form: &SignupForm, errors: &FormErrors) -> Result<Html<String>, AppError> {
    Ok(page("signup.html", context! { form => form, errors => errors })?)
}

pub async fn signup_form(session: Session) -> Result<Html<String>, AppError> {
    end_session(&session).await?;
    render_signup(&SignupForm::default(), &FormErrors::new())
}

pub async fn signup_submit(
    session: Session,
    State(state): State<AppState>,
    LenientForm(form): LenientForm<SignupForm>,
) -> Result<Response, AppError> {
    end_session(&session).await?;

    let valid = match form.validate() {
        Ok(valid) => valid,
        Err(errors) => return Ok(render_signup(&form, &errors)?.into_response()),
    };

    let hasher = state.hasher();
    let password = valid.password;
    let hash = blocking(move || hasher.generate_hash(&password)).await??;

    let created = state.with_store(|store| store.create_user(&valid.username, &hash, Utc::now()));
    match created {
        Ok(user) => {
            info!("created user {} (id {})", user.username(), user.id());
            Ok(found("/user/login/"))
        }
        Err(AppError::Store(StoreError::UsernameTaken { .. })) => {
            let mut errors = FormErrors::new();
            errors.add("username", USERNAME_TAKEN);
            Ok(render_signup(&form, &errors)?.into_response())
        }
        Err(e) => Err(e),
    }
}
