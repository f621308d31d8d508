//! Error types and Result aliases for dbsettings.
//!
//! There is exactly one failure in this crate: the settings file could not be
//! opened or read. The accessors recover from it locally, so only
//! [`Settings::try_load`](crate::Settings::try_load) ever returns it.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for settings operations.
#[derive(Error, Debug)]
pub enum Error {
    /// The settings file is missing, unreadable, or failed mid-read.
    #[error("settings file '{}' unavailable: {source}", path.display())]
    Unavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Create a settings-file-unavailable error.
    pub fn unavailable(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Unavailable {
            path: path.into(),
            source,
        }
    }

    /// Path of the settings file involved.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::Unavailable { path, .. } => path,
        }
    }
}
