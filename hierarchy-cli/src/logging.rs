//! Initialisation of the `tracing` subscriber shared by both tools.
use tracing_subscriber::EnvFilter;

/// Installs a human readable subscriber writing to stderr.
///
/// `RUST_LOG` wins when set; otherwise the level follows the `-v` count, starting at `warn`.
pub fn init(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    // Ignore the error if a subscriber is already installed.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
