// src/wait.rs

//! The waiter: poll a stream endpoint until it accepts a connection or a
//! deadline passes.
//!
//! Every connection-level error (name resolution, refusal, attempt timeout)
//! means "not yet available" and keeps the loop going; the only observable
//! outputs are the final boolean and the elapsed time. Raising the log level
//! to `debug` shows the individual attempt failures.

use std::net::{TcpStream, ToSocketAddrs};
use std::thread;
use std::time::{Duration, Instant};

use tracing::debug;

/// Nominal spacing between attempts, and the cap on a single attempt.
const ATTEMPT_INTERVAL: Duration = Duration::from_secs(1);

/// Immutable input for one wait call.
///
/// `address` is transport-qualified (`tcp://host:port`); `timeout_secs == 0`
/// is the sentinel for "never time out", not a very large bound.
#[derive(Debug, Clone)]
pub struct WaitRequest {
    pub address: String,
    pub timeout_secs: u64,
}

/// Outcome of one wait call. `elapsed_secs` is rounded to millisecond
/// precision and is reported even on failure.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaitResult {
    pub succeeded: bool,
    pub elapsed_secs: f64,
}

/// Block until `req.address` accepts a connection or the timeout expires.
///
/// One attempt per iteration, capped at 1 second so the overall deadline is
/// re-checked promptly. Failed iterations are padded out to ~1 second so an
/// instantly-refusing target does not turn the loop into a busy spin.
pub fn wait(req: &WaitRequest) -> WaitResult {
    let start = Instant::now();

    loop {
        let attempt_start = Instant::now();

        if try_connect(&req.address, ATTEMPT_INTERVAL) {
            return WaitResult {
                succeeded: true,
                elapsed_secs: round_millis(start.elapsed()),
            };
        }

        let elapsed = start.elapsed();
        if req.timeout_secs != 0 && elapsed.as_secs_f64() >= req.timeout_secs as f64 {
            return WaitResult {
                succeeded: false,
                elapsed_secs: round_millis(elapsed),
            };
        }

        let spent = attempt_start.elapsed();
        if spent < ATTEMPT_INTERVAL {
            thread::sleep(ATTEMPT_INTERVAL - spent);
        }
    }
}

/// One connection attempt. The stream is dropped (closed) immediately on
/// success; no payload is ever sent or read.
fn try_connect(address: &str, timeout: Duration) -> bool {
    let target = strip_scheme(address);

    let addr = match target.to_socket_addrs() {
        Ok(mut addrs) => match addrs.next() {
            Some(addr) => addr,
            None => {
                debug!(address, "no addresses resolved");
                return false;
            }
        },
        Err(err) => {
            debug!(address, error = %err, "name resolution failed");
            return false;
        }
    };

    match TcpStream::connect_timeout(&addr, timeout) {
        Ok(_stream) => true,
        Err(err) => {
            debug!(address, %addr, error = %err, "connection attempt failed");
            false
        }
    }
}

/// Drop a leading `scheme://` so `tcp://host:port` resolves as `host:port`.
fn strip_scheme(address: &str) -> &str {
    match address.find("://") {
        Some(idx) => &address[idx + 3..],
        None => address,
    }
}

fn round_millis(elapsed: Duration) -> f64 {
    (elapsed.as_secs_f64() * 1000.0).round() / 1000.0
}
