//! Settings store and three-tier resolution.

use super::parser;
use crate::{Error, Result};
use std::collections::HashMap;
use std::fmt;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Default settings file, relative to the working directory.
pub const DEFAULT_SETTINGS_FILE: &str = ".env";

/// Key for the database connection URL.
pub const DB_URL_KEY: &str = "DB_URL";
/// Key for the database user.
pub const DB_USER_KEY: &str = "DB_USER";
/// Key for the database password.
pub const DB_PASSWORD_KEY: &str = "DB_PASSWORD";
/// Key for the database driver identifier.
pub const DB_DRIVER_KEY: &str = "DB_DRIVER";

/// Default database connection URL.
pub const DEFAULT_DB_URL: &str = "jdbc:mysql://localhost:3310/java_college_db";
/// Default database user.
pub const DEFAULT_DB_USER: &str = "root";
/// Default database password.
pub const DEFAULT_DB_PASSWORD: &str = "";
/// Default database driver identifier.
pub const DEFAULT_DB_DRIVER: &str = "com.mysql.cj.jdbc.Driver";

/// Source for the environment tier of resolution.
pub trait Environment {
    /// Look up a variable. `None` when it is not set.
    fn var(&self, key: &str) -> Option<String>;
}

/// The real process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl Environment for ProcessEnv {
    fn var(&self, key: &str) -> Option<String> {
        // Non-Unicode values count as unset.
        std::env::var(key).ok()
    }
}

impl Environment for HashMap<String, String> {
    fn var(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

/// Settings loaded from a local file, backed by an environment source.
///
/// Entries are fixed at construction and never mutated afterwards.
#[derive(Clone)]
pub struct Settings<E = ProcessEnv> {
    entries: HashMap<String, String>,
    env: E,
}

impl Default for Settings {
    fn default() -> Self {
        Self::from_entries(HashMap::new())
    }
}

impl<E> fmt::Debug for Settings<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Keys only, values may be secrets.
        let mut keys: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        keys.sort_unstable();
        f.debug_struct("Settings").field("keys", &keys).finish_non_exhaustive()
    }
}

impl Settings {
    /// Load settings from `path`.
    ///
    /// A missing or unreadable file is a supported configuration: a warning
    /// is logged and the returned store is empty, so every lookup falls
    /// through to the environment and defaults.
    #[must_use]
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::try_load(path) {
            Ok(settings) => {
                tracing::info!(
                    path = %path.display(),
                    entries = settings.len(),
                    "Settings file loaded"
                );
                settings
            }
            Err(err) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %err,
                    "Settings file not loaded, using environment variables instead; \
                     create one based on .env.example"
                );
                Self::default()
            }
        }
    }

    /// Load settings from `path`, reporting failure to the caller.
    ///
    /// The file handle is released before this returns, on every path.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Unavailable`] if the file cannot be opened or a read
    /// fails. Nothing from a partially read file is kept. Invalid UTF-8 is
    /// not a read failure.
    pub fn try_load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| Error::unavailable(path, source))?;
        let entries = parser::parse_reader(BufReader::new(file))
            .map_err(|source| Error::unavailable(path, source))?;
        Ok(Self::from_entries(entries))
    }

    /// Build settings from already-parsed entries.
    #[must_use]
    pub fn from_entries(entries: HashMap<String, String>) -> Self {
        Self {
            entries,
            env: ProcessEnv,
        }
    }

    /// Build settings from settings-file text.
    #[must_use]
    pub fn parse(input: &str) -> Self {
        Self::from_entries(parser::parse_str(input))
    }
}

impl<E: Environment> Settings<E> {
    /// Replace the environment source, keeping the file entries.
    #[must_use]
    pub fn with_env<E2: Environment>(self, env: E2) -> Settings<E2> {
        Settings {
            entries: self.entries,
            env,
        }
    }

    /// Value from the settings file only.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Number of entries loaded from the settings file.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the settings file supplied no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Resolve `key`, first match wins:
    ///
    /// 1. the settings file entry, even if empty
    /// 2. the environment variable, if set and non-empty
    /// 3. `default`
    #[must_use]
    pub fn resolve(&self, key: &str, default: &str) -> String {
        if let Some(value) = self.entries.get(key) {
            return value.clone();
        }

        match self.env.var(key) {
            Some(value) if !value.is_empty() => value,
            _ => default.to_string(),
        }
    }

    /// Database connection URL.
    #[must_use]
    pub fn db_url(&self) -> String {
        self.resolve(DB_URL_KEY, DEFAULT_DB_URL)
    }

    /// Database user.
    #[must_use]
    pub fn db_user(&self) -> String {
        self.resolve(DB_USER_KEY, DEFAULT_DB_USER)
    }

    /// Database password.
    #[must_use]
    pub fn db_password(&self) -> String {
        self.resolve(DB_PASSWORD_KEY, DEFAULT_DB_PASSWORD)
    }

    /// Database driver identifier.
    #[must_use]
    pub fn db_driver(&self) -> String {
        self.resolve(DB_DRIVER_KEY, DEFAULT_DB_DRIVER)
    }

    /// Snapshot of all four connection settings.
    #[must_use]
    pub fn db_config(&self) -> DbConfig {
        DbConfig {
            url: self.db_url(),
            user: self.db_user(),
            password: self.db_password(),
            driver: self.db_driver(),
        }
    }
}

/// Resolved database connection settings.
///
/// `Debug` never prints the password.
#[derive(Clone, PartialEq, Eq)]
pub struct DbConfig {
    /// Connection URL.
    pub url: String,
    /// Connection user.
    pub user: String,
    /// Connection password.
    pub password: String,
    /// Driver identifier.
    pub driver: String,
}

impl fmt::Debug for DbConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let password = if self.password.is_empty() {
            "[EMPTY]"
        } else {
            "[REDACTED]"
        };
        f.debug_struct("DbConfig")
            .field("url", &self.url)
            .field("user", &self.user)
            .field("password", &password)
            .field("driver", &self.driver)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn test_defaults_with_no_file_and_no_env() {
        let settings = Settings::default().with_env(env(&[]));
        assert_eq!(settings.db_url(), DEFAULT_DB_URL);
        assert_eq!(settings.db_user(), "root");
        assert_eq!(settings.db_password(), "");
        assert_eq!(settings.db_driver(), "com.mysql.cj.jdbc.Driver");
    }

    #[test]
    fn test_file_takes_precedence_over_env() {
        let settings = Settings::parse("DB_USER=alice").with_env(env(&[("DB_USER", "mallory")]));
        assert_eq!(settings.db_user(), "alice");
    }

    #[test]
    fn test_env_used_when_file_lacks_key() {
        let settings =
            Settings::default().with_env(env(&[("DB_DRIVER", "org.postgresql.Driver")]));
        assert_eq!(settings.db_driver(), "org.postgresql.Driver");
    }

    #[test]
    fn test_empty_file_value_is_present() {
        let settings =
            Settings::parse("DB_PASSWORD=").with_env(env(&[("DB_PASSWORD", "from-env")]));
        assert_eq!(settings.db_password(), "");
    }

    #[test]
    fn test_empty_env_value_is_absent() {
        let settings = Settings::default().with_env(env(&[("DB_USER", "")]));
        assert_eq!(settings.db_user(), DEFAULT_DB_USER);
    }

    #[test]
    fn test_commented_key_falls_through() {
        let settings = Settings::parse("# DB_URL=ignored\n")
            .with_env(env(&[("DB_URL", "jdbc:mysql://env-host/db")]));
        assert_eq!(settings.db_url(), "jdbc:mysql://env-host/db");

        let settings = Settings::parse("# DB_URL=ignored\n").with_env(env(&[]));
        assert_eq!(settings.db_url(), DEFAULT_DB_URL);
    }

    #[test]
    fn test_duplicate_key_last_wins() {
        let settings = Settings::parse("DB_PASSWORD=first\nDB_PASSWORD=second\n").with_env(env(&[]));
        assert_eq!(settings.db_password(), "second");
    }

    #[test]
    fn test_malformed_line_is_ignored() {
        let settings =
            Settings::parse("DB_USER=bob\nthis is not a setting\n").with_env(env(&[]));
        assert_eq!(settings.len(), 1);
        assert_eq!(settings.db_user(), "bob");
        assert_eq!(settings.db_url(), DEFAULT_DB_URL);
    }

    #[test]
    fn test_resolve_arbitrary_key() {
        let settings = Settings::parse("POOL_SIZE=8").with_env(env(&[("TIMEOUT", "30")]));
        assert_eq!(settings.resolve("POOL_SIZE", "1"), "8");
        assert_eq!(settings.resolve("TIMEOUT", "10"), "30");
        assert_eq!(settings.resolve("MISSING", "fallback"), "fallback");
    }

    #[test]
    fn test_get_reads_file_tier_only() {
        let settings = Settings::parse("DB_USER=alice").with_env(env(&[("DB_DRIVER", "x")]));
        assert_eq!(settings.get("DB_USER"), Some("alice"));
        assert_eq!(settings.get("DB_DRIVER"), None);
    }

    #[test]
    fn test_process_env_tier() {
        let key = "DBSETTINGS_UNIT_PROCESS_ENV_TIER";
        std::env::set_var(key, "from-process");
        let settings = Settings::default();
        assert_eq!(settings.resolve(key, "default"), "from-process");
        std::env::remove_var(key);
        assert_eq!(settings.resolve(key, "default"), "default");
    }

    #[test]
    fn test_repeated_lookups_are_stable() {
        let settings = Settings::parse("DB_URL=jdbc:h2:mem:test").with_env(env(&[]));
        let first = settings.db_config();
        for _ in 0..10 {
            assert_eq!(settings.db_config(), first);
        }
    }

    #[test]
    fn test_db_config_debug_redacts_password() {
        let settings = Settings::parse("DB_PASSWORD=hunter2").with_env(env(&[]));
        let debug_str = format!("{:?}", settings.db_config());
        assert!(!debug_str.contains("hunter2"));
        assert!(debug_str.contains("[REDACTED]"));
        assert!(debug_str.contains(DEFAULT_DB_URL));
    }

    #[test]
    fn test_db_config_debug_marks_empty_password() {
        let settings = Settings::default().with_env(env(&[]));
        let debug_str = format!("{:?}", settings.db_config());
        assert!(debug_str.contains("[EMPTY]"));
    }

    #[test]
    fn test_settings_debug_hides_values() {
        let settings = Settings::parse("DB_USER=alice\nDB_PASSWORD=hunter2");
        let debug_str = format!("{settings:?}");
        assert!(debug_str.contains("DB_PASSWORD"));
        assert!(debug_str.contains("DB_USER"));
        assert!(!debug_str.contains("hunter2"));
        assert!(!debug_str.contains("alice"));
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let settings = Settings::load("/nonexistent/dbsettings/.env");
        assert!(settings.is_empty());
    }

    #[test]
    fn test_try_load_missing_file_is_error() {
        let err = Settings::try_load("/nonexistent/dbsettings/.env").unwrap_err();
        assert!(err.to_string().contains("unavailable"));
        assert_eq!(err.path(), Path::new("/nonexistent/dbsettings/.env"));
    }
}
