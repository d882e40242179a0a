//! Tracing setup: structured logging and span definitions.

pub mod spans;

use std::sync::Once;

use swap_core::config::ObservabilityConfig;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INIT: Once = Once::new();

/// Initialize the global subscriber.
///
/// `SWAP_LOG` overrides the configured level, e.g.
/// `SWAP_LOG=swap_control=debug,swap_agents=trace`.
/// Only the first call has an effect.
pub fn init_tracing(config: &ObservabilityConfig) {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env("SWAP_LOG")
            .unwrap_or_else(|_| EnvFilter::new(&config.log_level));

        let registry = tracing_subscriber::registry().with(filter);
        // A subscriber installed by the host application wins.
        let _ = if config.json {
            registry
                .with(fmt::layer().json().with_target(true).with_thread_ids(true))
                .try_init()
        } else {
            registry
                .with(
                    fmt::layer()
                        .with_target(true)
                        .with_thread_ids(true)
                        .with_file(true)
                        .with_line_number(true),
                )
                .try_init()
        };
    });
}
