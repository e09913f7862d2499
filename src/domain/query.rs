//! Ownership-scoped note listing with an optional search term.

use crate::domain::{Note, UserId};

/// Describes which notes a listing returns.
///
/// A query is always scoped to one owner. An optional search term narrows
/// the result to notes whose title or content contains the term, ignoring
/// case. Results are ordered newest first.
///
/// # Examples
///
/// ```
/// use scribe::domain::{NoteQuery, UserId};
///
/// let query = NoteQuery::for_owner(UserId::new(1)).search("groceries");
/// assert_eq!(query.search_term(), Some("groceries"));
///
/// // An empty term means "no search".
/// let query = NoteQuery::for_owner(UserId::new(1)).search("");
/// assert_eq!(query.search_term(), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteQuery {
    owner: UserId,
    search: Option<String>,
}

impl NoteQuery {
    pub fn for_owner(owner: UserId) -> Self {
        Self {
            owner,
            search: None,
        }
    }

    /// Narrows the query by a search term. Empty terms are ignored.
    pub fn search(mut self, term: impl Into<String>) -> Self {
        let term = term.into();
        self.search = if term.is_empty() { None } else { Some(term) };
        self
    }

    pub fn owner(&self) -> UserId {
        self.owner
    }

    pub fn search_term(&self) -> Option<&str> {
        self.search.as_deref()
    }

    /// Returns true if `note` belongs in this query's result set.
    pub fn matches(&self, note: &Note) -> bool {
        if !note.is_owned_by(self.owner) {
            return false;
        }
        match self.search_term() {
            None => true,
            Some(term) => {
                contains_ignore_case(note.title(), term)
                    || note
                        .content()
                        .is_some_and(|content| contains_ignore_case(content, term))
            }
        }
    }
}

/// Case-insensitive substring test with Unicode case folding.
///
/// The store registers this as a SQL function so listings and in-memory
/// checks agree.
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::NoteId;
    use chrono::Utc;

    fn note(author: i64, title: &str, content: Option<&str>) -> Note {
        let now = Utc::now();
        Note::from_parts(
            NoteId::new(1),
            title,
            content.map(str::to_string),
            UserId::new(author),
            now,
            now,
        )
    }

    #[test]
    fn contains_ignore_case_folds_ascii() {
        assert!(contains_ignore_case("Test Note", "test"));
        assert!(contains_ignore_case("test note", "NOTE"));
        assert!(!contains_ignore_case("Something else", "test"));
    }

    #[test]
    fn contains_ignore_case_folds_unicode() {
        assert!(contains_ignore_case("ÜBER alles", "über"));
        assert!(contains_ignore_case("Ελληνικά", "ελλ"));
    }

    #[test]
    fn empty_needle_matches_everything() {
        assert!(contains_ignore_case("", ""));
        assert!(contains_ignore_case("abc", ""));
    }

    #[test]
    fn query_without_search_matches_all_owned_notes() {
        let query = NoteQuery::for_owner(UserId::new(1));
        assert!(query.matches(&note(1, "Anything", None)));
        assert!(!query.matches(&note(2, "Anything", None)));
    }

    #[test]
    fn query_matches_title_or_content() {
        let query = NoteQuery::for_owner(UserId::new(1)).search("TEST");
        assert!(query.matches(&note(1, "Test Note1", None)));
        assert!(query.matches(&note(1, "Untitled", Some("this is a test note"))));
        assert!(!query.matches(&note(1, "Something else", Some("Something else"))));
    }

    #[test]
    fn search_never_crosses_owners() {
        let query = NoteQuery::for_owner(UserId::new(1)).search("test");
        assert!(!query.matches(&note(2, "Test Note", Some("test"))));
    }

    #[test]
    fn whitespace_term_is_kept_verbatim() {
        let query = NoteQuery::for_owner(UserId::new(1)).search(" ");
        assert_eq!(query.search_term(), Some(" "));
        assert!(query.matches(&note(1, "two words", None)));
        assert!(!query.matches(&note(1, "oneword", None)));
    }
}
