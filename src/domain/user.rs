//! User accounts and username validation.

use crate::domain::UserId;
use chrono::{DateTime, Utc};
use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

/// Maximum username length, in characters.
pub const USERNAME_MAX_CHARS: usize = 150;

static USERNAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\w.@+-]+$").expect("username pattern compiles"));

/// The kind of error that occurred when parsing a username.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParseUsernameErrorKind {
    Empty,
    TooLong,
    InvalidCharacters,
}

/// Error returned when parsing an invalid username.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseUsernameError {
    kind: ParseUsernameErrorKind,
}

impl fmt::Display for ParseUsernameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ParseUsernameErrorKind::Empty => write!(f, "This field is required."),
            ParseUsernameErrorKind::TooLong => write!(
                f,
                "Ensure this value has at most {} characters.",
                USERNAME_MAX_CHARS
            ),
            ParseUsernameErrorKind::InvalidCharacters => write!(
                f,
                "Enter a valid username. This value may contain only letters, numbers, and @/./+/-/_ characters."
            ),
        }
    }
}

impl std::error::Error for ParseUsernameError {}

/// A validated username.
///
/// Usernames hold 1 to [`USERNAME_MAX_CHARS`] letters, digits, or any of
/// `@ . + - _`. Comparison is case-sensitive.
///
/// # Examples
///
/// ```
/// use scribe::domain::Username;
///
/// let name: Username = "ada.lovelace".parse().unwrap();
/// assert_eq!(name.as_str(), "ada.lovelace");
/// assert!("has space".parse::<Username>().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Username(String);

impl Username {
    pub fn new(value: &str) -> Result<Self, ParseUsernameError> {
        let value = value.trim();
        let kind = if value.is_empty() {
            Some(ParseUsernameErrorKind::Empty)
        } else if value.chars().count() > USERNAME_MAX_CHARS {
            Some(ParseUsernameErrorKind::TooLong)
        } else if !USERNAME_PATTERN.is_match(value) {
            Some(ParseUsernameErrorKind::InvalidCharacters)
        } else {
            None
        };

        match kind {
            Some(kind) => Err(ParseUsernameError { kind }),
            None => Ok(Self(value.to_string())),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Username {
    type Err = ParseUsernameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A registered account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    username: Username,
    password_hash: String,
    date_joined: DateTime<Utc>,
    last_login: Option<DateTime<Utc>>,
}

impl User {
    /// Assembles a user from stored columns.
    pub fn from_parts(
        id: UserId,
        username: Username,
        password_hash: impl Into<String>,
        date_joined: DateTime<Utc>,
        last_login: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            id,
            username,
            password_hash: password_hash.into(),
            date_joined,
            last_login,
        }
    }

    pub fn id(&self) -> UserId {
        self.id
    }

    pub fn username(&self) -> &Username {
        &self.username
    }

    /// Returns the argon2 PHC string stored for this user.
    pub fn password_hash(&self) -> &str {
        &self.password_hash
    }

    pub fn date_joined(&self) -> DateTime<Utc> {
        self.date_joined
    }

    pub fn last_login(&self) -> Option<DateTime<Utc>> {
        self.last_login
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_allowed_punctuation() {
        for name in ["test_user", "a.b", "me@example.com", "x+y", "dash-ed", "42"] {
            assert!(Username::new(name).is_ok(), "{name} should be valid");
        }
    }

    #[test]
    fn accepts_unicode_letters() {
        assert!(Username::new("zoë").is_ok());
    }

    #[test]
    fn rejects_spaces_and_symbols() {
        for name in ["two words", "semi;colon", "slash/ed", "q?"] {
            assert!(Username::new(name).is_err(), "{name} should be invalid");
        }
    }

    #[test]
    fn rejects_empty() {
        let err = Username::new("  ").unwrap_err();
        assert_eq!(err.to_string(), "This field is required.");
    }

    #[test]
    fn rejects_overlong() {
        let name = "u".repeat(USERNAME_MAX_CHARS + 1);
        let err = Username::new(&name).unwrap_err();
        assert!(err.to_string().contains("at most 150"));
    }

    #[test]
    fn trims_surrounding_whitespace() {
        assert_eq!(Username::new(" bob ").unwrap().as_str(), "bob");
    }
}
