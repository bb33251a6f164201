//! Integration tests for casper-kit.
//!
//! Everything here runs offline against literal golden vectors.
//!
//! Run with: `cargo test --test integration`
//! Set `RUST_LOG=casper_kit=debug` to see the crate's log output.

use std::sync::Once;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

mod deploy_integration;
mod signing_integration;
mod transaction_integration;

/// Installs a test-writer subscriber filtered by `RUST_LOG`, once per binary.
pub fn init_tracing() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_test_writer())
            .try_init();
    });
}
