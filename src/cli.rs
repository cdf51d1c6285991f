// src/cli.rs

//! CLI argument parsing using `clap`.
//!
//! The historical surface of the tool is preserved: `-h` is the short form of
//! `--host` (not help; use `--help`), the first non-flag argument may be
//! `host:port`, and everything after the command token (or `--`) is the
//! subprocess to exec.

use clap::{ArgAction, CommandFactory, Parser};

/// Command-line arguments for `wait-for-it`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "wait-for-it",
    version,
    about = "Wait until a TCP host:port accepts connections, then optionally exec a command.",
    disable_help_flag = true,
    long_about = None
)]
pub struct CliArgs {
    /// Host or IP under test.
    #[arg(short = 'h', long, value_name = "HOST")]
    pub host: Option<String>,

    /// TCP port under test. Alternatively, pass the target as `host:port`.
    #[arg(short = 'p', long, value_name = "PORT")]
    pub port: Option<u16>,

    /// Only execute the command if the wait succeeds.
    #[arg(short = 's', long)]
    pub strict: bool,

    /// Don't output any status messages.
    #[arg(short = 'q', long)]
    pub quiet: bool,

    /// Print the resolved options before waiting.
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Timeout in seconds, zero for no timeout.
    #[arg(short = 't', long, value_name = "SECONDS", default_value_t = 15)]
    pub timeout: u64,

    /// Print help.
    #[arg(long, action = ArgAction::Help)]
    pub help: Option<bool>,

    /// Target as `host[:port]`.
    #[arg(value_name = "HOST:PORT")]
    pub target: Option<String>,

    /// Command (plus arguments) to exec after the wait finishes.
    #[arg(value_name = "COMMAND", trailing_var_arg = true)]
    pub command: Vec<String>,
}

/// Fully resolved options handed to `run`.
#[derive(Debug, Clone)]
pub struct Options {
    pub host: String,
    pub port: u16,
    pub strict: bool,
    pub quiet: bool,
    pub verbose: bool,
    pub timeout: u64,
    pub command: Vec<String>,
}

impl Options {
    /// Merge the positional `host:port` target with the explicit flags
    /// (flags win, matching the original tool's last-one-wins parsing) and
    /// validate that both host and port ended up present.
    ///
    /// When `--host` and `--port` are both given, the target is already fully
    /// specified, so a positional token can only be the start of the command
    /// to exec (`wait-for-it -h db -p 80 echo ok`).
    pub fn from_cli(cli: CliArgs) -> Result<Self, String> {
        let mut command = cli.command;

        let (target_host, target_port) = if cli.host.is_some() && cli.port.is_some() {
            if let Some(target) = cli.target {
                command.insert(0, target);
            }
            (None, None)
        } else {
            match cli.target.as_deref() {
                Some(target) => split_target(target)?,
                None => (None, None),
            }
        };

        let host = cli.host.or(target_host);
        let port = cli.port.or(target_port);

        let (host, port) = match (host, port) {
            (Some(host), Some(port)) => (host, port),
            (None, Some(_)) => return Err("Error: you need to provide a host".into()),
            (Some(_), None) => return Err("Error: you need to provide a port".into()),
            (None, None) => return Err("Error: you need to provide a host and port".into()),
        };

        Ok(Options {
            host,
            port,
            strict: cli.strict,
            quiet: cli.quiet,
            verbose: cli.verbose,
            timeout: cli.timeout,
            command,
        })
    }
}

/// Split `host[:port]` on the first colon. A trailing colon with nothing
/// after it counts as "no port", not a malformed one.
fn split_target(target: &str) -> Result<(Option<String>, Option<u16>), String> {
    match target.split_once(':') {
        Some((host, "")) => Ok((non_empty(host), None)),
        Some((host, port)) => {
            let port = port
                .parse::<u16>()
                .map_err(|_| format!("Error: invalid port '{port}'"))?;
            Ok((non_empty(host), Some(port)))
        }
        None => Ok((non_empty(target), None)),
    }
}

fn non_empty(s: &str) -> Option<String> {
    if s.is_empty() { None } else { Some(s.to_string()) }
}

/// Rendered help text, printed on misuse.
pub fn usage() -> String {
    CliArgs::command().render_help().to_string()
}

/// Parse an explicit argument vector (first element is the program name).
pub fn parse_from<I, S>(argv: I) -> Result<CliArgs, clap::Error>
where
    I: IntoIterator<Item = S>,
    S: Into<std::ffi::OsString> + Clone,
{
    CliArgs::try_parse_from(argv)
}

/// Parse the process arguments, mapping clap errors to the tool's historical
/// contract: usage on stdout and exit code 1 on bad flags, exit 0 for
/// `--help`/`--version`.
pub fn parse() -> CliArgs {
    match CliArgs::try_parse() {
        Ok(args) => args,
        Err(err) => {
            if err.use_stderr() {
                print!("{}", err.render());
                std::process::exit(1);
            }
            let _ = err.print();
            std::process::exit(0);
        }
    }
}
