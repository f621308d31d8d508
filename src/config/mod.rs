//! Database connection settings.
//!
//! Each setting resolves from, in order:
//! - The local settings file (`.env`, highest priority)
//! - Environment variables (ignored when empty)
//! - Built-in defaults (lowest priority)

mod global;
pub mod parser;
mod settings;

pub use global::{db_config, db_driver, db_password, db_url, db_user, init, install, settings};
pub use settings::{
    DbConfig, Environment, ProcessEnv, Settings, DB_DRIVER_KEY, DB_PASSWORD_KEY, DB_URL_KEY,
    DB_USER_KEY, DEFAULT_DB_DRIVER, DEFAULT_DB_PASSWORD, DEFAULT_DB_URL, DEFAULT_DB_USER,
    DEFAULT_SETTINGS_FILE,
};
