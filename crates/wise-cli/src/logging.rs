//! Logging setup
//!
//! Diagnostics go to stderr so table and JSON output on stdout stay clean.
//! `RUST_LOG` sets the filter (default `warn`); `--verbose` forces `debug`.

use tracing_subscriber::{fmt, EnvFilter};

pub fn init(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
