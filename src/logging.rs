//! Logging setup

use tracing_subscriber::EnvFilter;

/// Install the global subscriber. `RUST_LOG` wins over the default level.
/// Logs go to stderr so command output stays clean.
pub fn init_logging(verbose: bool) {
  let default_level = if verbose { "debug" } else { "warn" };
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

  // Ignore the error when a subscriber is already installed (tests, embedding)
  let _ = tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .with_target(false)
    .try_init();
}
