//! Process-wide settings, initialised once.
//!
//! The store is loaded from [`DEFAULT_SETTINGS_FILE`] on first access unless
//! the application installs one explicitly at startup. After that it is
//! read-only for the lifetime of the process.

use super::settings::{DbConfig, Settings, DEFAULT_SETTINGS_FILE};
use once_cell::sync::OnceCell;

static SETTINGS: OnceCell<Settings> = OnceCell::new();

/// The process-wide settings, loading `.env` on first call.
///
/// Concurrent first calls block until a single load has finished.
#[must_use]
pub fn settings() -> &'static Settings {
    SETTINGS.get_or_init(|| Settings::load(DEFAULT_SETTINGS_FILE))
}

/// Eagerly initialise the process-wide settings.
#[must_use]
pub fn init() -> &'static Settings {
    settings()
}

/// Install an explicitly built store as the process-wide settings.
///
/// # Errors
///
/// Hands `settings` back if a store was already installed or loaded.
pub fn install(settings: Settings) -> Result<(), Settings> {
    SETTINGS.set(settings)
}

/// Database connection URL.
#[must_use]
pub fn db_url() -> String {
    settings().db_url()
}

/// Database user.
#[must_use]
pub fn db_user() -> String {
    settings().db_user()
}

/// Database password.
#[must_use]
pub fn db_password() -> String {
    settings().db_password()
}

/// Database driver identifier.
#[must_use]
pub fn db_driver() -> String {
    settings().db_driver()
}

/// All four connection settings.
#[must_use]
pub fn db_config() -> DbConfig {
    settings().db_config()
}
