//! Output format types for CLI commands.

use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde::Serialize;

use crate::store::UserSummary;

/// Output format for command results.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output for programmatic consumption
    Json,
}

/// Wrapper for serializable command output.
#[derive(Debug, Serialize)]
pub struct Output<T: Serialize> {
    pub data: T,
}

impl<T: Serialize> Output<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

/// A single user in listing output.
#[derive(Debug, Serialize)]
pub struct UserListing {
    pub id: i64,
    pub username: String,
    pub notes: usize,
    pub date_joined: DateTime<Utc>,
    pub last_login: Option<DateTime<Utc>>,
}

impl From<&UserSummary> for UserListing {
    fn from(summary: &UserSummary) -> Self {
        let user = summary.user();
        Self {
            id: user.id().get(),
            username: user.username().to_string(),
            notes: summary.note_count(),
            date_joined: user.date_joined(),
            last_login: user.last_login(),
        }
    }
}
