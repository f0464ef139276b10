//! Process tests for the `server_ctl` binary: exit codes, usage on stderr and
//! the printed plan.

#![expect(
    clippy::panic_in_result_fn,
    reason = "assertions report mismatches more clearly than early returns"
)]

use anyhow::Result;
use assert_cmd::Command;
use rstest::rstest;

struct Run {
    code: Option<i32>,
    stdout: String,
    stderr: String,
}

fn server_ctl(args: &[&str]) -> Result<Run> {
    #[expect(deprecated, reason = "cargo_bin is the standard assert_cmd API")]
    let mut cmd = Command::cargo_bin("server_ctl")?;
    cmd.env_remove("RUST_LOG").env("RUST_BACKTRACE", "0").args(args);
    let output = cmd.output()?;
    Ok(Run {
        code: output.status.code(),
        stdout: String::from_utf8(output.stdout)?,
        stderr: String::from_utf8(output.stderr)?,
    })
}

#[rstest]
fn start_prints_the_plan() -> Result<()> {
    let run = server_ctl(&["--name", "api", "start", "--port", "8080"])?;
    assert_eq!(run.code, Some(0), "stderr: {}", run.stderr);
    assert_eq!(run.stdout, "starting api on 127.0.0.1:8080 in the foreground\n");
    Ok(())
}

#[rstest]
fn verbose_stop_explains_each_step() -> Result<()> {
    let run = server_ctl(&["-n", "api", "--verbose", "stop"])?;
    assert_eq!(run.code, Some(0), "stderr: {}", run.stderr);
    assert_eq!(run.stdout, "draining connections\nstopping api gracefully\n");
    Ok(())
}

#[rstest]
#[case::missing_name(&["start", "--port", "1"])]
#[case::missing_port(&["--name", "api", "start"])]
#[case::bad_port(&["--name", "api", "start", "--port", "http"])]
#[case::blank_name(&["--name", " ", "stop"])]
fn bad_input_exits_with_usage(#[case] args: &[&str]) -> Result<()> {
    let run = server_ctl(args)?;
    assert_eq!(run.code, Some(2), "stdout: {}", run.stdout);
    assert!(run.stderr.contains("Usage: server_ctl"), "stderr: {}", run.stderr);
    assert!(run.stderr.contains("server_ctl: error: "), "stderr: {}", run.stderr);
    assert!(run.stdout.is_empty());
    Ok(())
}

#[rstest]
#[case::help("--help", "Control a pretend network service.")]
#[case::version("--version", env!("CARGO_PKG_VERSION"))]
fn display_requests_exit_cleanly(#[case] flag: &str, #[case] expected: &str) -> Result<()> {
    let run = server_ctl(&[flag])?;
    assert_eq!(run.code, Some(0), "stderr: {}", run.stderr);
    assert!(run.stdout.contains(expected), "stdout: {}", run.stdout);
    Ok(())
}

#[rstest]
fn help_lists_commands_and_headings() -> Result<()> {
    let run = server_ctl(&["--help"])?;
    for expected in [
        "required arguments:",
        "optional arguments:",
        "commands:",
        "start",
        "stop",
        "--no-verbose",
        "Set RUST_LOG=debug to trace parsing.",
    ] {
        assert!(run.stdout.contains(expected), "missing {expected:?} in\n{}", run.stdout);
    }
    Ok(())
}
