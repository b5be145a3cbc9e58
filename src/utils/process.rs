//! Subprocess helpers
//!
//! Every backend talks to its package manager through these two functions.
//! A non-zero exit status is always an error; callers that want to tolerate
//! one must inspect the output themselves via `capture`.

use crate::error::{Result, UpmError};
use crate::ui;
use std::path::Path;
use std::process::{Command, Output, Stdio};

fn describe(args: &[String]) -> String {
    args.join(" ")
}

fn build(args: &[String], cwd: &Path) -> Result<Command> {
    let (program, rest) = args.split_first().ok_or_else(|| {
        UpmError::SystemCommandFailed {
            command: String::new(),
            reason: "empty command line".to_string(),
        }
    })?;

    if which::which(program).is_err() {
        return Err(UpmError::DependencyMissing(program.clone()));
    }

    let mut cmd = Command::new(program);
    cmd.args(rest).current_dir(cwd);
    Ok(cmd)
}

/// Run a command with the terminal attached, failing on non-zero exit.
pub fn run_cmd(args: &[String], cwd: &Path) -> Result<()> {
    let command = describe(args);
    ui::progress(&command);

    let status = build(args, cwd)?
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .map_err(|e| UpmError::SystemCommandFailed {
            command: command.clone(),
            reason: e.to_string(),
        })?;

    if !status.success() {
        return Err(UpmError::PackageManagerError(format!(
            "'{}' exited with {}",
            command, status
        )));
    }

    Ok(())
}

/// Run a command and return everything it wrote, whatever its exit status.
pub fn capture(args: &[String], cwd: &Path) -> Result<Output> {
    let command = describe(args);
    ui::verbose(&command);

    build(args, cwd)?
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .map_err(|e| UpmError::SystemCommandFailed {
            command,
            reason: e.to_string(),
        })
}

/// Run a command and return its stdout, failing on non-zero exit.
pub fn get_cmd_output(args: &[String], cwd: &Path) -> Result<Vec<u8>> {
    let output = capture(args, cwd)?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(UpmError::SystemCommandFailed {
            command: describe(args),
            reason: format!("{}: {}", output.status, stderr.trim()),
        });
    }

    Ok(output.stdout)
}

/// Build an owned argument vector from string slices.
pub fn argv<I, S>(parts: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    parts.into_iter().map(Into::into).collect()
}
