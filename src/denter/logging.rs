//! Tracing setup for binaries and tests.
//!
//! The library only emits `tracing` events; nothing is printed unless a subscriber is
//! installed. [`init_tracing`] installs a formatting subscriber filtered by `RUST_LOG`, and
//! only when that variable is set, so normal runs stay quiet. For example:
//!
//! ```text
//! RUST_LOG=denter=trace denter execute sample.calc
//! ```

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Install the global subscriber if `RUST_LOG` is set. Safe to call more than once.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            // Another subscriber may already be installed by an embedding application
            let _ = tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .with_writer(std::io::stderr)
                        .with_target(true)
                        .with_level(true),
                )
                .with(filter)
                .try_init();
        }
    });
}
