//! Logging and tracing configuration
//!
//! Diagnostics go to stderr so a pipe client driving the process over
//! stdin/stdout is never polluted. The subscriber serializes output, so the
//! two relay loops can log concurrently without interleaving lines.

use tracing_subscriber::{
    fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};

/// Initialize tracing for the relay (stderr logging)
///
/// Logs are controlled by the `RUST_LOG` environment variable.
/// Default level is INFO for this crate, WARN for dependencies. The log
/// target identifies the emitting side (`pipe2tcp::relay::tcp` vs
/// `pipe2tcp::relay::pipe`).
pub fn init() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("pipe2tcp=info,warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .init();
}
