//! Log filtering for the events this crate emits.
//!
//! dbsettings only reports through `tracing`; it never installs a subscriber
//! on its own. [`filter`] lets a host raise or lower the settings diagnostics
//! without touching other crates. [`init_tracing`] wires it to a plain `fmt`
//! subscriber for binaries that have none.

use tracing_subscriber::filter::{EnvFilter, LevelFilter};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Target prefix shared by every event from this crate.
pub const TARGET: &str = "dbsettings";

/// Variable holding extra directives, in `RUST_LOG` syntax.
pub const FILTER_ENV: &str = "DBSETTINGS_LOG";

/// Filter passing this crate's events at `level` and other targets at `warn`.
///
/// Directives from `DBSETTINGS_LOG` are appended. If they do not parse they
/// are dropped and the preset is used alone.
#[must_use]
pub fn filter(level: LevelFilter) -> EnvFilter {
    let extra = std::env::var(FILTER_ENV).unwrap_or_default();
    build_filter(level, &extra)
}

fn build_filter(level: LevelFilter, extra: &str) -> EnvFilter {
    let preset = format!("warn,{TARGET}={level}");
    let extra = extra.trim();
    if extra.is_empty() {
        return EnvFilter::new(preset);
    }
    EnvFilter::try_new(format!("{preset},{extra}")).unwrap_or_else(|_| EnvFilter::new(preset))
}

/// Install a global `fmt` subscriber using [`filter`].
///
/// Returns `false` if the process already has a global subscriber, which is
/// then left in place.
pub fn init_tracing(level: LevelFilter) -> bool {
    tracing_subscriber::registry()
        .with(filter(level))
        .with(fmt::layer().with_target(true))
        .try_init()
        .is_ok()
}
