// src/report.rs

//! User-facing status messages.
//!
//! These lines are part of the CLI contract (not diagnostics), so they go
//! through this small struct rather than `tracing`: plain text on stderr,
//! suppressed entirely by `--quiet`. Passing the flag explicitly keeps the
//! quiet state out of globals.

/// Writes status lines to stderr unless quiet.
#[derive(Debug, Clone, Copy)]
pub struct Reporter {
    quiet: bool,
}

impl Reporter {
    pub fn new(quiet: bool) -> Self {
        Reporter { quiet }
    }

    /// Print one status line to stderr, unless quiet.
    pub fn status(&self, message: &str) {
        if !self.quiet {
            eprintln!("wait-for-it: {message}");
        }
    }
}
