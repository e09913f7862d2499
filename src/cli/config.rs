//! Configuration file support.

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::auth::HashingConfig;

/// Default listen address for `serve`.
pub const DEFAULT_BIND: &str = "127.0.0.1:8000";
/// Default session lifetime, in days of inactivity.
pub const DEFAULT_SESSION_DAYS: i64 = 14;

/// Application configuration loaded from config file.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// SQLite database file
    pub database: Option<PathBuf>,

    /// Listen address, e.g. `0.0.0.0:8000`
    pub bind: Option<String>,

    /// Mark the session cookie `Secure` (serve over HTTPS only)
    pub secure_cookies: bool,

    /// Days of inactivity before a session expires
    pub session_days: Option<i64>,

    /// Argon2 cost parameters
    pub password_hashing: HashingConfig,
}

impl Config {
    /// Load configuration from `path`, or from the default location.
    ///
    /// A missing default file yields the default config. A missing file
    /// named explicitly is an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = match path {
            Some(p) => {
                if !p.exists() {
                    bail!("configuration file at {} does not exist", p.display());
                }
                p.to_path_buf()
            }
            None => {
                let p = Self::config_path();
                if !p.exists() {
                    return Ok(Self::default());
                }
                p
            }
        };

        let contents = std::fs::read_to_string(&config_path)
            .with_context(|| format!("failed to read config file: {}", config_path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", config_path.display()))
    }

    /// Returns the path to the config file.
    ///
    /// Default: `~/.config/scribe/config.toml`
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("scribe")
            .join("config.toml")
    }

    /// Resolve the database path, with CLI argument taking precedence.
    ///
    /// Precedence order:
    /// 1. CLI `--database` argument
    /// 2. Config file `database` setting
    /// 3. `<data dir>/scribe/scribe.db`
    pub fn database_path(&self, cli_database: Option<&PathBuf>) -> PathBuf {
        cli_database
            .cloned()
            .or_else(|| self.database.clone())
            .unwrap_or_else(|| {
                dirs::data_dir()
                    .unwrap_or_else(|| PathBuf::from("."))
                    .join("scribe")
                    .join("scribe.db")
            })
    }

    /// Resolve the listen address, with CLI argument taking precedence.
    pub fn bind_addr(&self, cli_bind: Option<&str>) -> String {
        cli_bind
            .map(str::to_string)
            .or_else(|| self.bind.clone())
            .unwrap_or_else(|| DEFAULT_BIND.to_string())
    }

    /// Session lifetime in days; non-positive values fall back to the default.
    pub fn session_days(&self) -> i64 {
        self.session_days
            .filter(|days| *days > 0)
            .unwrap_or(DEFAULT_SESSION_DAYS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn default_config_has_no_database() {
        let config = Config::default();
        assert!(config.database.is_none());
        assert!(!config.secure_cookies);
    }

    #[test]
    fn database_prefers_cli_arg() {
        let config = Config {
            database: Some(PathBuf::from("/config/notes.db")),
            ..Config::default()
        };
        let cli = PathBuf::from("/cli/notes.db");
        assert_eq!(config.database_path(Some(&cli)), cli);
    }

    #[test]
    fn database_falls_back_to_config() {
        let config = Config {
            database: Some(PathBuf::from("/config/notes.db")),
            ..Config::default()
        };
        assert_eq!(
            config.database_path(None),
            PathBuf::from("/config/notes.db")
        );
    }

    #[test]
    fn database_defaults_into_data_dir() {
        let path = Config::default().database_path(None);
        assert!(path.ends_with("scribe/scribe.db"));
    }

    #[test]
    fn bind_precedence() {
        let config = Config {
            bind: Some("0.0.0.0:9000".to_string()),
            ..Config::default()
        };
        assert_eq!(config.bind_addr(Some("127.0.0.1:1")), "127.0.0.1:1");
        assert_eq!(config.bind_addr(None), "0.0.0.0:9000");
        assert_eq!(Config::default().bind_addr(None), DEFAULT_BIND);
    }

    #[test]
    fn session_days_ignores_nonsense() {
        let config = Config {
            session_days: Some(0),
            ..Config::default()
        };
        assert_eq!(config.session_days(), DEFAULT_SESSION_DAYS);
    }

    #[test]
    fn load_parses_toml() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
database = "/srv/scribe.db"
bind = "0.0.0.0:8080"
secure_cookies = true
session_days = 3

[password_hashing]
memory_kib = 4096
iterations = 3
"#
        )
        .unwrap();

        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.database, Some(PathBuf::from("/srv/scribe.db")));
        assert_eq!(config.bind.as_deref(), Some("0.0.0.0:8080"));
        assert!(config.secure_cookies);
        assert_eq!(config.session_days(), 3);
        assert_eq!(config.password_hashing.memory_kib, 4096);
        assert_eq!(config.password_hashing.iterations, 3);
        assert_eq!(config.password_hashing.parallelism, 1);
    }

    #[test]
    fn load_missing_explicit_file_fails() {
        let err = Config::load(Some(Path::new("/definitely/not/here.toml"))).unwrap_err();
        assert!(err.to_string().contains("does not exist"));
    }

    #[test]
    fn load_reports_parse_errors() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "bind = [").unwrap();
        let err = Config::load(Some(file.path())).unwrap_err();
        assert!(err.to_string().contains("failed to parse config file"));
    }

    #[test]
    fn config_path_is_in_config_dir() {
        let path = Config::config_path();
        assert!(path.ends_with("scribe/config.toml"));
    }
}
