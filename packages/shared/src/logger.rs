//! Logging setup for the Denwa binaries.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the tracing subscriber with the specified default log level.
///
/// The filter covers the library crate of the calling package and the binary
/// itself. `RUST_LOG` overrides it entirely.
///
/// # Arguments
///
/// * `crate_name` - The library crate to enable (e.g., "denwa_server")
/// * `binary_name` - The name of the binary (e.g., "denwa-server")
/// * `default_log_level` - The default log level (e.g., "debug", "info")
///
/// # Examples
///
/// ```no_run
/// use denwa_shared::logger::setup_logger;
///
/// setup_logger("denwa_server", "denwa-server", "debug");
/// ```
pub fn setup_logger(crate_name: &str, binary_name: &str, default_log_level: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter(crate_name, binary_name, default_log_level).into());
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Build the default `EnvFilter` directive string.
///
/// Binary names use `-` but tracing targets use `_`, so both names are normalized.
fn default_filter(crate_name: &str, binary_name: &str, default_log_level: &str) -> String {
    format!(
        "{}={},{}={},tower_http={}",
        crate_name.replace('-', "_"),
        default_log_level,
        binary_name.replace('-', "_"),
        default_log_level,
        default_log_level
    )
}
