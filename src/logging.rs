use tracing_subscriber::{EnvFilter, fmt};

/// Installs the console subscriber.
///
/// `RUST_LOG` takes precedence; otherwise `default_level` applies, e.g. `info`
/// or `station_watch=debug`.
pub fn init(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // Ignore the error when a subscriber is already installed.
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init();
}
