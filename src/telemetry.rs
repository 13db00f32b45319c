//! Tracing setup for host applications.
//!
//! The sync core only emits `tracing` events; hosts that already install a
//! subscriber can skip this module entirely. `init` is for hosts that want
//! a sensible default: verbosity-driven level, overridable via
//! `INKSTREAM_LOG`.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::util::SubscriberInitExt;

const ENV_FILTER_VAR: &str = "INKSTREAM_LOG";

/// Install the default subscriber. Call at most once per process.
///
/// Returns false when a global subscriber is already installed, which is
/// fine - it means the host owns telemetry.
pub fn init(verbosity: u8) -> bool {
    let filter = EnvFilter::builder()
        .with_default_directive(level_from_verbosity(verbosity).into())
        .with_env_var(ENV_FILTER_VAR)
        .from_env_lossy();

    tracing_subscriber::fmt()
        .compact()
        .with_env_filter(filter)
        .finish()
        .try_init()
        .is_ok()
}

fn level_from_verbosity(verbosity: u8) -> tracing::metadata::LevelFilter {
    match verbosity {
        0 => tracing::metadata::LevelFilter::ERROR,
        1 => tracing::metadata::LevelFilter::INFO,
        _ => tracing::metadata::LevelFilter::DEBUG,
    }
}
