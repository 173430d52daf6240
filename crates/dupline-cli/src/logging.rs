//! Logging setup for the command-line host
//!
//! Log records go to stderr so stdout only carries the edited document.
//! Configure via RUST_LOG:
//! - `RUST_LOG=debug` - every skipped selection and committed batch
//! - `RUST_LOG=dupline_core::engine=trace` - one record per emitted edit

use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the stderr subscriber. `verbose` forces `debug`.
pub fn init(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_filter(filter);

    tracing_subscriber::registry().with(stderr_layer).init();
}
