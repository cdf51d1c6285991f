// src/exec.rs

//! The executor: resolve a command name to something runnable and replace the
//! current process with it.
//!
//! Resolution order, first success wins:
//! 1. the command names an existing file on disk,
//! 2. the command is found on `PATH` (via the `which` crate),
//! 3. shell fallback: `sh -c <command line>`, with each argument quoted via
//!    `shlex` and the command itself passed through so caller-supplied shell
//!    syntax (`foo && bar`) keeps working.
//!
//! A successful exec never returns; the environment is inherited unmodified.
//! There is no retry of a failed exec, the resolution chain above is the only
//! fallback.

use std::convert::Infallible;
use std::fs;
use std::path::PathBuf;
use std::process::Command;

use anyhow::{Context, anyhow};
use tracing::debug;

use crate::errors::Result;

/// Consumed exactly once; the calling process does not survive a successful
/// exec.
#[derive(Debug, Clone)]
pub struct ExecRequest {
    pub command: String,
    pub args: Vec<String>,
}

/// Resolve `command` to an executable path plus the argument list to hand it.
pub fn resolve(command: &str, args: &[String]) -> Result<(PathBuf, Vec<String>)> {
    if let Ok(path) = fs::canonicalize(command) {
        if path.is_file() {
            debug!(command, path = %path.display(), "command is an existing file");
            return Ok((path, args.to_vec()));
        }
    }

    if let Ok(found) = which::which(command) {
        let path = fs::canonicalize(&found).unwrap_or(found);
        debug!(command, path = %path.display(), "command found on PATH");
        return Ok((path, args.to_vec()));
    }

    let shell = which::which("sh").unwrap_or_else(|_| PathBuf::from("/bin/sh"));
    let line = shell_command_line(command, args)?;
    debug!(command, shell = %shell.display(), line, "falling back to shell");
    Ok((shell, vec!["-c".to_string(), line]))
}

/// Rebuild a single shell command line from a command and its arguments.
///
/// The command part is the caller's own shell snippet and passes through
/// verbatim; every argument is individually quoted so embedded spaces,
/// quotes, and metacharacters survive as one word each.
pub fn shell_command_line(command: &str, args: &[String]) -> Result<String> {
    let mut line = String::from(command);
    for arg in args {
        let quoted = shlex::try_quote(arg)
            .map_err(|_| anyhow!("argument contains a NUL byte: {arg:?}"))?;
        line.push(' ');
        line.push_str(&quoted);
    }
    Ok(line)
}

/// Replace the current process image with the resolved command.
///
/// On success this never returns and no further code in this process runs;
/// the exit status becomes whatever the replacement produces. The returned
/// error is therefore always a failure of the replacement call itself.
#[cfg(unix)]
pub fn exec(req: ExecRequest) -> Result<Infallible> {
    use std::os::unix::process::CommandExt;

    let (path, args) = resolve(&req.command, &req.args)?;
    let err = Command::new(&path).args(&args).exec();
    Err::<Infallible, _>(err)
        .with_context(|| format!("replacing process with '{}'", path.display()))
}

/// Platforms without an exec primitive: spawn the child, wait for it, and
/// exit with its code. Observably equivalent apart from PID persistence,
/// which this tool does not rely on.
#[cfg(not(unix))]
pub fn exec(req: ExecRequest) -> Result<Infallible> {
    let (path, args) = resolve(&req.command, &req.args)?;
    let status = Command::new(&path)
        .args(&args)
        .status()
        .with_context(|| format!("running '{}'", path.display()))?;
    std::process::exit(status.code().unwrap_or(1));
}
