//! Note handlers: list, view, add, edit, delete.

use axum::extract::{Path, State};
use axum::response::{Html, IntoResponse, Response};
use chrono::Utc;
use log::info;
use minijinja::context;
use serde::Deserialize;

use crate::domain::{
    ADD_TITLE_MAX_CHARS, FormErrors, Note, NoteForm, NoteId, NoteQuery, TITLE_MAX_CHARS, User,
};
use crate::store::NoteRepository;
use crate::web::templates::page;
use crate::web::views::NoteView;
use crate::web::{AppError, AppState, AuthUser, LenientForm, LenientQuery, found};

const ADD_TITLE_LABEL: &str = "Title (Max length: 50)";
const EDIT_TITLE_LABEL: &str = "Title";

/// Query string of the list page.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    #[serde(default)]
    pub search: String,
}

/// Loads a note for `user`, failing with 404 for unknown ids and 403 for
/// notes owned by someone else.
fn owned_note(state: &AppState, raw_id: &str, user: &User) -> Result<Note, AppError> {
    let id: NoteId = raw_id.parse().map_err(|_| AppError::NotFound)?;
    let note = state
        .with_store(|store| store.get_note(id))?
        .ok_or(AppError::NotFound)?;
    note.ensure_owned_by(user.id())?;
    Ok(note)
}

pub async fn index(
    auth: AuthUser,
    State(state): State<AppState>,
    LenientQuery(params): LenientQuery<ListParams>,
) -> Result<Html<String>, AppError> {
    let query = NoteQuery::for_owner(auth.user.id()).search(params.search.as_str());
    let notes = state.with_store(|store| store.list_notes(&query))?;
    let views: Vec<NoteView> = notes.iter().map(NoteView::from).collect();

    Ok(page(
        "index.html",
        context! {
            user => auth.user.username(),
            notes => views,
            search => params.search,
        },
    )?)
}

pub async fn single(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Html<String>, AppError> {
    let note = owned_note(&state, &id, &auth.user)?;

    Ok(page(
        "single.html",
        context! {
            user => auth.user.username(),
            note => NoteView::from(&note),
        },
    )?)
}

fn render_add(user: &User, form: &NoteForm, errors: &FormErrors) -> Result<Html<String>, AppError> {
    Ok(page(
        "add.html",
        context! {
            user => user.username(),
            form => form,
            errors => errors,
            title_label => ADD_TITLE_LABEL,
            title_max => ADD_TITLE_MAX_CHARS,
        },
    )?)
}

pub async fn add_form(auth: AuthUser) -> Result<Html<String>, AppError> {
    render_add(&auth.user, &NoteForm::default(), &FormErrors::new())
}

pub async fn add_submit(
    auth: AuthUser,
    State(state): State<AppState>,
    LenientForm(form): LenientForm<NoteForm>,
) -> Result<Response, AppError> {
    let draft = match form.validate_add() {
        Ok(draft) => draft,
        Err(errors) => return Ok(render_add(&auth.user, &form, &errors)?.into_response()),
    };

    let author = auth.user.id();
    let note = state.with_store(|store| store.create_note(author, &draft, Utc::now()))?;
    info!("user {} created note {}", author, note.id());

    Ok(found("/"))
}

fn render_edit(
    user: &User,
    note: &Note,
    form: &NoteForm,
    errors: &FormErrors,
) -> Result<Html<String>, AppError> {
    Ok(page(
        "edit.html",
        context! {
            user => user.username(),
            note => NoteView::from(note),
            form => form,
            errors => errors,
            title_label => EDIT_TITLE_LABEL,
            title_max => TITLE_MAX_CHARS,
        },
    )?)
}

pub async fn edit_form(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Html<String>, AppError> {
    let note = owned_note(&state, &id, &auth.user)?;
    render_edit(&auth.user, &note, &NoteForm::from_note(&note), &FormErrors::new())
}

pub async fn edit_submit(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    LenientForm(form): LenientForm<NoteForm>,
) -> Result<Response, AppError> {
    let note = owned_note(&state, &id, &auth.user)?;
    let draft = match form.validate_edit() {
        Ok(draft) => draft,
        Err(errors) => {
            return Ok(render_edit(&auth.user, &note, &form, &errors)?.into_response());
        }
    };

    state.with_store(|store| store.update_note(note.id(), &draft, Utc::now()))?;
    info!("user {} updated note {}", auth.user.id(), note.id());

    Ok(found("/"))
}

pub async fn delete_confirm(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Html<String>, AppError> {
    let note = owned_note(&state, &id, &auth.user)?;

    Ok(page(
        "delete.html",
        context! {
            user => auth.user.username(),
            note => NoteView::from(&note),
        },
    )?)
}

pub async fn delete_submit(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let note = owned_note(&state, &id, &auth.user)?;
    state.with_store(|store| store.delete_note(note.id()))?;
    info!("user {} deleted note {}", auth.user.id(), note.id());

    Ok(found("/"))
}
