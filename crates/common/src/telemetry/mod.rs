//! Tracing initialization
//!
//! Shared subscriber setup so every embedding binary configures logging the
//! same way: env-filter driven level, optional JSON output.

use crate::config::ObservabilityConfig;
use tracing_subscriber::EnvFilter;

/// Initialize the global tracing subscriber from configuration
///
/// `RUST_LOG` overrides the configured level when set. Safe to call once
/// per process; returns quietly if a subscriber is already installed.
pub fn init_tracing(config: &ObservabilityConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.clone()));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    let result = if config.json_logging {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    if result.is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
}
