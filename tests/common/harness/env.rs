//! Isolated test environment with temp directory.

#![allow(dead_code)]

use super::ScribeCommand;
use scribe::store::SqliteStore;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Config that keeps password hashing cheap enough for tests.
const TEST_CONFIG: &str = "\
[password_hashing]
memory_kib = 8
iterations = 1
parallelism = 1
";

/// Isolated test environment with a temporary database and config file.
///
/// The temp directory is removed when the TestEnv is dropped.
pub struct TestEnv {
    /// The temporary directory (kept for lifetime management)
    _temp_dir: TempDir,
    db_path: PathBuf,
    config_path: PathBuf,
}

impl TestEnv {
    /// Creates a new isolated test environment.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let db_path = temp_dir.path().join("data").join("scribe.db");
        let config_path = temp_dir.path().join("config.toml");
        std::fs::write(&config_path, TEST_CONFIG).expect("Failed to write config");
        Self {
            _temp_dir: temp_dir,
            db_path,
            config_path,
        }
    }

    /// Returns the path of the SQLite database.
    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    /// Returns the path of the config file.
    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Opens the environment's database directly.
    pub fn open_store(&self) -> SqliteStore {
        SqliteStore::open(&self.db_path).expect("Failed to open store")
    }

    /// Creates a ScribeCommand configured for this test environment.
    pub fn cmd(&self) -> ScribeCommand {
        ScribeCommand::new()
            .config(&self.config_path)
            .database(&self.db_path)
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}
