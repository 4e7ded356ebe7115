//! Logging setup utilities for the Hibiki binaries.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the tracing subscriber with the specified default log level.
///
/// Sets up logging for the calling crate, the binary and the shared crates.
/// The log level can be overridden using the `RUST_LOG` environment variable.
///
/// # Arguments
///
/// * `crate_name` - The calling crate's name (pass `env!("CARGO_PKG_NAME")`)
/// * `binary_name` - The name of the binary (e.g., "hibiki-relay")
/// * `default_log_level` - The default log level (e.g., "debug", "info", "warn", "error")
///
/// # Examples
///
/// ```no_run
/// use hibiki_shared::logger::setup_logger;
///
/// setup_logger(env!("CARGO_PKG_NAME"), "hibiki-relay", "debug");
/// ```
pub fn setup_logger(crate_name: &str, binary_name: &str, default_log_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter(crate_name, binary_name, default_log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Build the filter directive used when `RUST_LOG` is not set.
fn default_filter(crate_name: &str, binary_name: &str, level: &str) -> String {
    let mut targets = vec![
        crate_name.replace('-', "_"),
        binary_name.replace('-', "_"),
        "hibiki_relay".to_string(),
        "hibiki_shared".to_string(),
        "tower_http".to_string(),
    ];
    targets.sort();
    targets.dedup();

    targets
        .iter()
        .map(|target| format!("{}={}", target, level))
        .collect::<Vec<_>>()
        .join(",")
}
