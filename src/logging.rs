// src/logging.rs

//! Logging setup using `tracing` + `tracing-subscriber`.
//!
//! Priority for determining the log level:
//! 1. `WAIT_FOR_IT_LOG` environment variable (e.g. "info", "debug")
//! 2. `--verbose` CLI flag (debug)
//! 3. default to `warn`
//!
//! Diagnostics go to stderr so stdout stays clean for whatever command the
//! tool eventually execs into. The per-attempt connection failures the
//! waiter swallows show up at `debug`.

use tracing_subscriber::fmt;

use crate::errors::Result;

/// Initialise the global logging subscriber.
///
/// Safe to call once at startup.
pub fn init_logging(verbose: bool) -> Result<()> {
    let level = std::env::var("WAIT_FOR_IT_LOG")
        .ok()
        .and_then(|s| parse_level_str(&s))
        .unwrap_or(if verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::WARN
        });

    // `init()` panics if called twice; we only call it once in main.
    fmt()
        .with_max_level(level)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    Ok(())
}

fn parse_level_str(s: &str) -> Option<tracing::Level> {
    match s.trim().to_lowercase().as_str() {
        "error" => Some(tracing::Level::ERROR),
        "warn" | "warning" => Some(tracing::Level::WARN),
        "info" => Some(tracing::Level::INFO),
        "debug" => Some(tracing::Level::DEBUG),
        "trace" => Some(tracing::Level::TRACE),
        _ => None,
    }
}
