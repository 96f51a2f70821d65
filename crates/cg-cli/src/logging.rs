//! Log output for the CLI.
//!
//! Logs go to stderr so the transcript on stdout stays clean.

use tracing_subscriber::EnvFilter;

/// Environment variable that overrides the `-v` derived filter.
pub const LOG_ENV: &str = "CYBERGUARD_LOG";

/// Map the `-v` count to a filter directive.
pub fn verbosity_to_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Install the global subscriber. Later calls are ignored.
pub fn init_logging(verbosity: u8) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(verbosity_to_directive(verbosity)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(verbosity >= 2)
        .with_writer(std::io::stderr)
        .try_init();
}
