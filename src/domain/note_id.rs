//! Integer identifiers for notes and users.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A unique identifier for a note.
///
/// Identifiers are assigned by the store on insert and are never reused,
/// so a deleted note's id keeps resolving to "not found".
///
/// # Examples
///
/// ```
/// use scribe::domain::NoteId;
///
/// let id: NoteId = "42".parse().unwrap();
/// assert_eq!(id.get(), 42);
/// assert_eq!(id.to_string(), "42");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteId(i64);

impl NoteId {
    /// Wraps a raw database id.
    pub fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// Returns the raw database id.
    pub fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Error returned when parsing an invalid identifier string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseIdError {
    value: String,
}

impl fmt::Display for ParseIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid identifier '{}'", self.value)
    }
}

impl std::error::Error for ParseIdError {}

/// Parses a positive decimal integer, the only form route segments take.
fn parse_positive(s: &str) -> Result<i64, ParseIdError> {
    let err = || ParseIdError {
        value: s.to_string(),
    };
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(err());
    }
    match s.parse::<i64>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(err()),
    }
}

impl FromStr for NoteId {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_positive(s).map(Self)
    }
}

/// A unique identifier for a user account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(i64);

impl UserId {
    /// Wraps a raw database id.
    pub fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// Returns the raw database id.
    pub fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for UserId {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_positive(s).map(Self)
    }
}
