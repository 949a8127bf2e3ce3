//! # Telemetry
//!
//! Installs the `tracing` subscriber for hosts embedding parcel-core.
//!
//! ## Log Levels
//! - `RUST_LOG=debug` - Show every dispatch and rejection
//! - `RUST_LOG=parcel_core=trace` - Trace parcel-core only
//! - Otherwise: the configured [`LoggingSettings::filter`]

use tracing_subscriber::EnvFilter;

use crate::config::LoggingSettings;

/// Installs a global fmt subscriber.
///
/// Returns `false` if a global subscriber was already set, so calling this
/// from several entry points (or tests) is harmless.
pub fn init_tracing(settings: &LoggingSettings) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .is_ok()
}
