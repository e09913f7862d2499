//! Core types: Note, User, identifiers, listing queries, and forms

mod forms;
mod note;
mod note_id;
mod query;
mod user;

pub use forms::{
    ADD_TITLE_MAX_CHARS, ADD_TITLE_MIN_CHARS, FormErrors, LoginForm, NoteForm, PASSWORD_MIN_CHARS,
    SignupForm, ValidSignup, password_problems,
};
pub use note::{AccessDenied, Note, NoteDraft, ParseNoteError, TITLE_MAX_CHARS};
pub use note_id::{NoteId, ParseIdError, UserId};
pub use query::{NoteQuery, contains_ignore_case};
pub use user::{ParseUsernameError, USERNAME_MAX_CHARS, User, Username};
