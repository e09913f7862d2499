//! Note entity and the validated draft used to create or replace one.

use crate::domain::{NoteId, UserId};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

/// Maximum title length, in characters, accepted by the store.
pub const TITLE_MAX_CHARS: usize = 150;

/// The kind of error that occurred when constructing a note draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParseNoteErrorKind {
    EmptyTitle,
    TitleTooLong { chars: usize },
}

/// Error returned when constructing an invalid note draft.
#[derive(Debug, Clone)]
pub struct ParseNoteError {
    kind: ParseNoteErrorKind,
}

impl fmt::Display for ParseNoteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ParseNoteErrorKind::EmptyTitle => write!(f, "invalid note: title cannot be empty"),
            ParseNoteErrorKind::TitleTooLong { chars } => write!(
                f,
                "invalid note: title has {} characters (at most {} allowed)",
                chars, TITLE_MAX_CHARS
            ),
        }
    }
}

impl std::error::Error for ParseNoteError {}

/// Returned when a user touches a note they do not own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccessDenied {
    pub note: NoteId,
    pub user: UserId,
}

impl fmt::Display for AccessDenied {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "user {} does not own note {}", self.user, self.note)
    }
}

impl std::error::Error for AccessDenied {}

/// Title and content of a note, validated against the storage rules.
///
/// The title is trimmed and must hold 1 to [`TITLE_MAX_CHARS`] characters.
/// Blank content is normalized to `None`.
///
/// # Examples
///
/// ```
/// use scribe::domain::NoteDraft;
///
/// let draft = NoteDraft::new("  Groceries ", Some("milk\neggs")).unwrap();
/// assert_eq!(draft.title(), "Groceries");
/// assert_eq!(draft.content(), Some("milk\neggs"));
///
/// assert!(NoteDraft::new("   ", None::<String>).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteDraft {
    title: String,
    content: Option<String>,
}

impl NoteDraft {
    /// Creates a draft, trimming both fields.
    ///
    /// # Errors
    ///
    /// Returns `ParseNoteError` if the trimmed title is empty or longer than
    /// [`TITLE_MAX_CHARS`] characters.
    pub fn new(
        title: impl AsRef<str>,
        content: Option<impl AsRef<str>>,
    ) -> Result<Self, ParseNoteError> {
        let title = title.as_ref().trim();
        if title.is_empty() {
            return Err(ParseNoteError {
                kind: ParseNoteErrorKind::EmptyTitle,
            });
        }

        let chars = title.chars().count();
        if chars > TITLE_MAX_CHARS {
            return Err(ParseNoteError {
                kind: ParseNoteErrorKind::TitleTooLong { chars },
            });
        }

        let content = content
            .map(|c| c.as_ref().trim().to_string())
            .filter(|c| !c.is_empty());

        Ok(Self {
            title: title.to_string(),
            content,
        })
    }

    /// Returns the trimmed title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the trimmed content, if any.
    pub fn content(&self) -> Option<&str> {
        self.content.as_deref()
    }
}

/// A persisted note.
///
/// Every note has exactly one author. Only the author may see, edit or
/// delete it; the check lives in [`Note::ensure_owned_by`] and is applied
/// by the request handlers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Note {
    id: NoteId,
    title: String,
    content: Option<String>,
    author: UserId,
    created: DateTime<Utc>,
    updated: DateTime<Utc>,
}

impl Note {
    /// Assembles a note from stored columns.
    pub fn from_parts(
        id: NoteId,
        title: impl Into<String>,
        content: Option<String>,
        author: UserId,
        created: DateTime<Utc>,
        updated: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            content,
            author,
            created,
            updated,
        }
    }

    pub fn id(&self) -> NoteId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> Option<&str> {
        self.content.as_deref()
    }

    pub fn author(&self) -> UserId {
        self.author
    }

    /// Returns when the note was created. Never changes after insert.
    pub fn created(&self) -> DateTime<Utc> {
        self.created
    }

    /// Returns when the note was last saved.
    pub fn updated(&self) -> DateTime<Utc> {
        self.updated
    }

    /// Returns true if `user` authored this note.
    pub fn is_owned_by(&self, user: UserId) -> bool {
        self.author == user
    }

    /// Fails with [`AccessDenied`] unless `user` authored this note.
    pub fn ensure_owned_by(&self, user: UserId) -> Result<(), AccessDenied> {
        if self.is_owned_by(user) {
            Ok(())
        } else {
            Err(AccessDenied {
                note: self.id,
                user,
            })
        }
    }

    /// Returns the path of the note's detail page.
    pub fn url(&self) -> String {
        format!("/note/{}/", self.id)
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.title)
    }
}
