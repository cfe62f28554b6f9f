//! Tracing subscriber setup for console output.
use tracing_subscriber::EnvFilter;

/// Initialise the global tracing subscriber.
///
/// The default level is `info` (`debug` with `--verbose`); either can be
/// overridden through the `TOOLBRIDGE_LOG` environment variable using the
/// usual env-filter syntax.
pub fn init_subscriber(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_env("TOOLBRIDGE_LOG")
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    // try_init so repeated calls (e.g. from tests) are harmless.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .try_init();
}
