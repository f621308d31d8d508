//! dbsettings
//!
//! Database connection settings read from a local `.env` file, falling back
//! to environment variables and then to built-in defaults.

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod observability;

pub use config::{db_config, db_driver, db_password, db_url, db_user, DbConfig, Settings};
pub use error::{Error, Result};
