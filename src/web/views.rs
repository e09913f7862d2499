//! Template-facing views of domain values.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::Note;

/// Human-readable timestamp, e.g. `Jan 15, 2024, 10:30 UTC`.
pub(crate) fn display_time(at: DateTime<Utc>) -> String {
    at.format("%b %-d, %Y, %H:%M UTC").to_string()
}

/// A note as the templates see it.
#[derive(Debug, Serialize)]
pub struct NoteView<'a> {
    pub id: i64,
    pub title: &'a str,
    pub content: Option<&'a str>,
    pub url: String,
    pub created: String,
    pub created_iso: String,
    pub updated: String,
    pub was_edited: bool,
}

impl<'a> From<&'a Note> for NoteView<'a> {
    fn from(note: &'a Note) -> Self {
        Self {
            id: note.id().get(),
            title: note.title(),
            content: note.content(),
            url: note.url(),
            created: display_time(note.created()),
            created_iso: note.created().to_rfc3339(),
            updated: display_time(note.updated()),
            was_edited: note.updated() != note.created(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{NoteId, UserId};
    use chrono::{Duration, TimeZone};

    #[test]
    fn formats_display_time() {
        let at = Utc.with_ymd_and_hms(2024, 1, 5, 9, 7, 0).unwrap();
        assert_eq!(display_time(at), "Jan 5, 2024, 09:07 UTC");
    }

    #[test]
    fn view_flags_edited_notes() {
        let created = Utc.with_ymd_and_hms(2024, 1, 5, 9, 7, 0).unwrap();
        let fresh = Note::from_parts(NoteId::new(3), "T", None, UserId::new(1), created, created);
        let edited = Note::from_parts(
            NoteId::new(3),
            "T",
            None,
            UserId::new(1),
            created,
            created + Duration::minutes(1),
        );

        assert!(!NoteView::from(&fresh).was_edited);
        assert!(NoteView::from(&edited).was_edited);
        assert_eq!(NoteView::from(&fresh).url, "/note/3/");
    }
}
