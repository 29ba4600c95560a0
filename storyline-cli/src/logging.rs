//! Structured logging to stderr.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;

/// Install the global subscriber.
///
/// `RUST_LOG` wins when set; otherwise `verbose` selects debug output for
/// storyline crates and warnings for everything else.
pub fn init_logging(verbose: bool) {
    let default_directive = if verbose {
        "warn,storyline_core=debug,storyline=debug"
    } else {
        "warn"
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    // A second install (e.g. in tests) keeps the first subscriber.
    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
