//! Submitted form data and its validation rules.
//!
//! Each form deserializes straight from an urlencoded request body. Missing
//! fields default to empty strings so validation, not deserialization,
//! reports them. Validation collects every field error before failing.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{NoteDraft, TITLE_MAX_CHARS, Username};

/// Shortest title the add form accepts.
pub const ADD_TITLE_MIN_CHARS: usize = 5;
/// Longest title the add form accepts.
pub const ADD_TITLE_MAX_CHARS: usize = 50;
/// Shortest password accepted on signup.
pub const PASSWORD_MIN_CHARS: usize = 8;

const REQUIRED: &str = "This field is required.";

/// A small list of passwords rejected outright.
const COMMON_PASSWORDS: &[&str] = &[
    "password",
    "password1",
    "password123",
    "passw0rd",
    "12345678",
    "123456789",
    "1234567890",
    "11111111",
    "87654321",
    "abc12345",
    "abcd1234",
    "iloveyou",
    "letmein1",
    "qwerty123",
    "qwertyuiop",
    "sunshine",
    "princess",
    "football",
    "baseball",
    "welcome1",
    "admin123",
    "trustno1",
    "superman",
    "starwars",
    "whatever",
    "dragon12",
    "monkey12",
    "changeme",
];

/// Field and form-wide errors from a failed validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Error)]
#[error("invalid form: {} field(s) with errors, {} form error(s)", .fields.len(), .non_field.len())]
pub struct FormErrors {
    fields: BTreeMap<String, Vec<String>>,
    non_field: Vec<String>,
}

impl FormErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an error against a named field.
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.fields
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    /// Records an error that is not tied to a single field.
    pub fn add_non_field(&mut self, message: impl Into<String>) {
        self.non_field.push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.non_field.is_empty()
    }

    /// Returns the messages recorded for `field`.
    pub fn field(&self, field: &str) -> &[String] {
        self.fields.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn non_field(&self) -> &[String] {
        &self.non_field
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    fn into_result<T>(self, value: impl FnOnce() -> T) -> Result<T, FormErrors> {
        if self.is_empty() {
            Ok(value())
        } else {
            Err(self)
        }
    }
}

fn check_length(errors: &mut FormErrors, field: &str, value: &str, min: usize, max: usize) {
    let chars = value.chars().count();
    if chars < min {
        errors.add(
            field,
            format!("Ensure this value has at least {min} characters (it has {chars})."),
        );
    } else if chars > max {
        errors.add(
            field,
            format!("Ensure this value has at most {max} characters (it has {chars})."),
        );
    }
}

/// The note add/edit form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
}

impl NoteForm {
    /// Prefills the form from an existing note.
    pub fn from_note(note: &crate::domain::Note) -> Self {
        Self {
            title: note.title().to_string(),
            content: note.content().unwrap_or_default().to_string(),
        }
    }

    /// Validates a new note: the title must hold 5 to 50 characters.
    pub fn validate_add(&self) -> Result<NoteDraft, FormErrors> {
        self.validate(ADD_TITLE_MIN_CHARS, ADD_TITLE_MAX_CHARS)
    }

    /// Validates an edit: the title must hold 1 to 150 characters.
    pub fn validate_edit(&self) -> Result<NoteDraft, FormErrors> {
        self.validate(1, TITLE_MAX_CHARS)
    }

    fn validate(&self, min: usize, max: usize) -> Result<NoteDraft, FormErrors> {
        let mut errors = FormErrors::new();
        let title = self.title.trim();
        if title.is_empty() {
            errors.add("title", REQUIRED);
        } else {
            check_length(&mut errors, "title", title, min, max);
        }
        if !errors.is_empty() {
            return Err(errors);
        }

        NoteDraft::new(title, Some(&self.content)).map_err(|e| {
            let mut errors = FormErrors::new();
            errors.add("title", e.to_string());
            errors
        })
    }
}

/// Credentials submitted to the login page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default, skip_serializing)]
    pub password: String,
    #[serde(default)]
    pub next: String,
}

impl LoginForm {
    /// Checks that both credentials were supplied.
    pub fn validate(&self) -> Result<(String, String), FormErrors> {
        let mut errors = FormErrors::new();
        let username = self.username.trim();
        if username.is_empty() {
            errors.add("username", REQUIRED);
        }
        if self.password.is_empty() {
            errors.add("password", REQUIRED);
        }
        errors.into_result(|| (username.to_string(), self.password.clone()))
    }
}

/// The account creation form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignupForm {
    #[serde(default)]
    pub username: String,
    #[serde(default, skip_serializing)]
    pub password1: String,
    #[serde(default, skip_serializing)]
    pub password2: String,
}

/// A signup that passed validation. Username uniqueness is checked by
/// the store on insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidSignup {
    pub username: Username,
    pub password: String,
}

impl SignupForm {
    pub fn validate(&self) -> Result<ValidSignup, FormErrors> {
        let mut errors = FormErrors::new();

        let username = match Username::new(&self.username) {
            Ok(name) => Some(name),
            Err(e) => {
                errors.add("username", e.to_string());
                None
            }
        };

        if self.password1.is_empty() {
            errors.add("password1", REQUIRED);
        }
        if self.password2.is_empty() {
            errors.add("password2", REQUIRED);
        }

        if !self.password1.is_empty() && !self.password2.is_empty() {
            if self.password1 != self.password2 {
                errors.add("password2", "The two password fields didn't match.");
            } else {
                let name = username.as_ref().map(Username::as_str);
                for message in password_problems(&self.password2, name) {
                    errors.add("password2", message);
                }
            }
        }

        match username {
            Some(username) if errors.is_empty() => Ok(ValidSignup {
                username,
                password: self.password1.clone(),
            }),
            _ => Err(errors),
        }
    }
}

/// Returns every reason `password` is too weak.
pub fn password_problems(password: &str, username: Option<&str>) -> Vec<String> {
    let mut problems = Vec::new();
    let lowered = password.to_lowercase();

    if let Some(name) = username {
        let name = name.to_lowercase();
        if name.chars().count() >= 3 && lowered.contains(&name) {
            problems.push("The password is too similar to the username.".to_string());
        }
    }

    if password.chars().count() < PASSWORD_MIN_CHARS {
        problems.push(format!(
            "This password is too short. It must contain at least {PASSWORD_MIN_CHARS} characters."
        ));
    }

    if COMMON_PASSWORDS.contains(&lowered.trim()) {
        problems.push("This password is too common.".to_string());
    }

    if !password.is_empty() && password.chars().all(|c| c.is_ascii_digit()) {
        problems.push("This password is entirely numeric.".to_string());
    }

    problems
}
