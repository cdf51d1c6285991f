use std::error::Error;
use std::net::TcpListener;
use std::process::{Command, Output};
use std::time::{Duration, Instant};

type TestResult = Result<(), Box<dyn Error>>;

const BIN: &str = env!("CARGO_BIN_EXE_wait-for-it");

fn run_bin(args: &[&str]) -> Result<Output, Box<dyn Error>> {
    Ok(Command::new(BIN).args(args).output()?)
}

fn free_port() -> Result<u16, Box<dyn Error>> {
    let listener = TcpListener::bind("127.0.0.1:0")?;
    Ok(listener.local_addr()?.port())
}

#[test]
fn timeout_against_dead_port_exits_one_quickly() -> TestResult {
    let port = free_port()?;
    let target = format!("127.0.0.1:{port}");

    let started = Instant::now();
    let output = run_bin(&[&target, "-t", "1"])?;

    assert_eq!(output.status.code(), Some(1));
    assert!(started.elapsed() < Duration::from_secs(4));
    let stderr = String::from_utf8(output.stderr)?;
    assert!(stderr.contains("timeout occurred"), "{stderr}");
    Ok(())
}

#[test]
fn listening_port_execs_the_command() -> TestResult {
    let listener = TcpListener::bind("127.0.0.1:0")?;
    let target = format!("127.0.0.1:{}", listener.local_addr()?.port());

    let output = run_bin(&[&target, "-t", "5", "--", "echo", "ok"])?;

    assert_eq!(output.status.code(), Some(0));
    assert!(String::from_utf8(output.stdout)?.contains("ok"));
    let stderr = String::from_utf8(output.stderr)?;
    assert!(stderr.contains("is available after"), "{stderr}");
    Ok(())
}

#[test]
fn strict_mode_skips_the_command_on_timeout() -> TestResult {
    let port = free_port()?;
    let target = format!("127.0.0.1:{port}");

    let output = run_bin(&[&target, "-t", "1", "-s", "--", "echo", "marker"])?;

    assert_eq!(output.status.code(), Some(1));
    assert!(!String::from_utf8(output.stdout)?.contains("marker"));
    let stderr = String::from_utf8(output.stderr)?;
    assert!(stderr.contains("refusing to execute"), "{stderr}");
    Ok(())
}

#[test]
fn non_strict_mode_still_execs_after_timeout() -> TestResult {
    let port = free_port()?;
    let target = format!("127.0.0.1:{port}");

    let output = run_bin(&[&target, "-t", "1", "--", "echo", "anyway"])?;

    // The exec replaces the process, so the exit code is echo's.
    assert_eq!(output.status.code(), Some(0));
    assert!(String::from_utf8(output.stdout)?.contains("anyway"));
    Ok(())
}

#[test]
fn shell_syntax_command_runs_through_the_fallback() -> TestResult {
    let listener = TcpListener::bind("127.0.0.1:0")?;
    let target = format!("127.0.0.1:{}", listener.local_addr()?.port());

    let output = run_bin(&[&target, "-t", "5", "--", "echo hi && echo bye"])?;

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8(output.stdout)?;
    assert!(stdout.contains("hi"), "{stdout}");
    assert!(stdout.contains("bye"), "{stdout}");
    Ok(())
}

#[test]
fn unknown_flag_exits_one_with_usage_on_stdout() -> TestResult {
    let output = run_bin(&["127.0.0.1:80", "--bogus"])?;

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8(output.stdout)?.contains("Usage"));
    Ok(())
}

#[test]
fn missing_port_names_what_is_missing() -> TestResult {
    let output = run_bin(&["justahost", "-t", "1"])?;

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8(output.stderr)?.contains("provide a port"));
    assert!(String::from_utf8(output.stdout)?.contains("Usage"));
    Ok(())
}

#[test]
fn quiet_suppresses_status_messages() -> TestResult {
    let port = free_port()?;
    let target = format!("127.0.0.1:{port}");

    let output = run_bin(&[&target, "-q", "-t", "1"])?;

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8(output.stderr)?.is_empty());
    Ok(())
}

#[test]
fn verbose_prints_the_resolved_options() -> TestResult {
    let listener = TcpListener::bind("127.0.0.1:0")?;
    let target = format!("127.0.0.1:{}", listener.local_addr()?.port());

    let output = run_bin(&[&target, "-v", "-t", "5"])?;

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8(output.stdout)?;
    assert!(stdout.contains("Using these options"), "{stdout}");
    Ok(())
}

#[test]
fn exec_of_unrunnable_target_fails_non_zero() -> TestResult {
    let listener = TcpListener::bind("127.0.0.1:0")?;
    let target = format!("127.0.0.1:{}", listener.local_addr()?.port());

    // Nothing resolves this path, so it reaches the shell fallback, and sh
    // itself exits non-zero when the command inside the line is unrunnable.
    let output = run_bin(&[&target, "-t", "5", "--", "/definitely/not/here"])?;

    assert_ne!(output.status.code(), Some(0));
    Ok(())
}
