//! Fluent wrapper around assert_cmd::Command.

// Allow dead code since this is a test utility shared by several test binaries
#![allow(dead_code)]

use assert_cmd::Command;
use serde::de::DeserializeOwned;
use std::path::Path;

/// Fluent wrapper around `assert_cmd::Command` for the `scribe` binary.
///
/// Provides a builder-style API for constructing and executing CLI commands.
pub struct ScribeCommand {
    args: Vec<String>,
    stdin: Option<String>,
}

impl ScribeCommand {
    /// Creates a new command for the `scribe` binary.
    pub fn new() -> Self {
        Self {
            args: Vec::new(),
            stdin: None,
        }
    }

    /// Sets the `--config` option.
    pub fn config(self, path: &Path) -> Self {
        self.args(["--config".to_string(), path.to_string_lossy().to_string()])
    }

    /// Sets the `--database` option.
    pub fn database(self, path: &Path) -> Self {
        self.args(["--database".to_string(), path.to_string_lossy().to_string()])
    }

    /// Adds arguments to the command.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.args
            .extend(args.into_iter().map(|s| s.as_ref().to_string()));
        self
    }

    /// Feeds `input` to the command's stdin.
    pub fn stdin(mut self, input: &str) -> Self {
        self.stdin = Some(input.to_string());
        self
    }

    /// Returns the current arguments (for testing).
    pub fn get_args(&self) -> &[String] {
        &self.args
    }

    /// Runs the command and returns an Assert for making assertions.
    #[allow(deprecated)]
    pub fn assert(self) -> assert_cmd::assert::Assert {
        let mut cmd = Command::cargo_bin("scribe").expect("Failed to find scribe binary");
        cmd.args(&self.args);
        cmd.env_remove("RUST_LOG");
        if let Some(input) = self.stdin {
            cmd.write_stdin(input);
        }
        cmd.assert()
    }

    /// Runs the command, expects success, and returns stdout as a string.
    pub fn output_success(self) -> String {
        let output = self.assert().success().get_output().stdout.clone();
        String::from_utf8(output).expect("Output was not valid UTF-8")
    }

    /// Runs the command, expects success, and parses stdout as JSON.
    pub fn output_json<T: DeserializeOwned>(self) -> T {
        let output = self.output_success();
        serde_json::from_str(&output).expect("Failed to parse output as JSON")
    }

    // ===========================================
    // Command Shortcuts
    // ===========================================

    /// Configures for the `adduser` command, with the password on stdin.
    pub fn adduser(self, username: &str, password: &str) -> Self {
        self.args(["adduser", username])
            .stdin(&format!("{password}\n"))
    }

    /// Configures for the `users` command.
    pub fn users(self) -> Self {
        self.args(["users"])
    }

    /// Configures for the `deluser` command.
    pub fn deluser(self, username: &str) -> Self {
        self.args(["deluser", username])
    }

    /// Adds `--format json` to the command.
    pub fn format_json(self) -> Self {
        self.args(["--format", "json"])
    }
}

impl Default for ScribeCommand {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_command_runs_binary() {
        ScribeCommand::new().args(["--help"]).assert().success();
    }

    #[test]
    fn test_command_with_database() {
        let temp = TempDir::new().unwrap();
        let db = temp.path().join("scribe.db");
        let cmd = ScribeCommand::new().database(&db);
        let args = cmd.get_args();
        assert_eq!(args[0], "--database");
        assert_eq!(args[1], db.to_string_lossy());
    }

    #[test]
    fn test_command_shortcuts() {
        let cmd = ScribeCommand::new().users().format_json();
        assert_eq!(cmd.get_args(), ["users", "--format", "json"]);
    }
}
