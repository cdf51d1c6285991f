// src/lib.rs

pub mod cli;
pub mod errors;
pub mod exec;
pub mod logging;
pub mod report;
pub mod wait;

use tracing::info;

use crate::cli::Options;
use crate::errors::Result;
use crate::exec::ExecRequest;
use crate::report::Reporter;
use crate::wait::WaitRequest;

/// High-level entry point used by `main.rs`.
///
/// Waits for the target, reports the outcome, and — if a command was
/// supplied and strict mode allows it — execs into it. Returns the exit code
/// (0 on success, 1 on timeout) when no exec happens; a successful exec
/// never comes back here.
pub fn run(opts: Options) -> Result<i32> {
    let reporter = Reporter::new(opts.quiet);

    if opts.verbose {
        print_options(&opts);
    }

    if opts.timeout > 0 {
        reporter.status(&format!(
            "waiting {} sec for {}:{}",
            opts.timeout, opts.host, opts.port
        ));
    } else {
        reporter.status(&format!(
            "waiting for {}:{} without a timeout",
            opts.host, opts.port
        ));
    }

    let request = WaitRequest {
        address: format!("tcp://{}:{}", opts.host, opts.port),
        timeout_secs: opts.timeout,
    };
    let result = wait::wait(&request);

    if result.succeeded {
        reporter.status(&format!(
            "{}:{} is available after {} seconds",
            opts.host, opts.port, result.elapsed_secs
        ));
    } else {
        reporter.status(&format!(
            "timeout occurred after waiting {} seconds for {}:{}",
            result.elapsed_secs, opts.host, opts.port
        ));
    }

    if let Some((command, args)) = opts.command.split_first() {
        if result.succeeded || !opts.strict {
            info!(command, "replacing process");
            // Only returns on failure; on success the process is gone.
            match exec::exec(ExecRequest {
                command: command.clone(),
                args: args.to_vec(),
            }) {
                Ok(never) => match never {},
                Err(err) => return Err(err),
            }
        }
        reporter.status("strict mode, refusing to execute subprocess");
    }

    Ok(if result.succeeded { 0 } else { 1 })
}

/// Verbose dump of the resolved options, printed before waiting.
fn print_options(opts: &Options) {
    println!("wait-for-it: Using these options:");
    println!("\thost:    '{}'", opts.host);
    println!("\tport:    '{}'", opts.port);
    println!("\tstrict:  {}", opts.strict);
    println!("\tquiet:   {}", opts.quiet);
    println!("\tverbose: {}", opts.verbose);
    println!("\ttimeout: {}", opts.timeout);
}
