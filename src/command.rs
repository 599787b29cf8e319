use std::process::{Command, ExitStatus};
use std::time::Duration;

use wait_timeout::ChildExt;

use crate::config::defaults;
use crate::error::{GhcError, Result};

/// Runs external commands with inherited standard streams.
///
/// Command lines are split on whitespace: the first token is the program,
/// the rest are arguments. There is no shell interpretation.
pub struct CommandRunner;

impl CommandRunner {
    /// Runs a command to completion, echoing the command line first.
    pub fn run(command: &str) -> Result<()> {
        let (program, args) = split_command(command)?;
        println!("Running: {}", command);
        let status = Command::new(program)
            .args(args)
            .status()
            .map_err(|e| GhcError::command(format!("could not start '{}': {}", command, e)))?;
        check_status(command, status)
    }

    /// Runs a command under a deadline, killing it on expiry.
    ///
    /// A `timeout_secs` of zero or below means the default deadline.
    pub fn run_with_timeout(command: &str, timeout_secs: i64) -> Result<()> {
        let (program, args) = split_command(command)?;
        let seconds = if timeout_secs <= 0 {
            defaults::COMMAND_TIMEOUT_SECS
        } else {
            timeout_secs as u64
        };

        let mut child = Command::new(program)
            .args(args)
            .spawn()
            .map_err(|e| GhcError::command(format!("could not start '{}': {}", command, e)))?;

        match child.wait_timeout(Duration::from_secs(seconds))? {
            Some(status) => check_status(command, status),
            None => {
                child.kill().ok();
                child.wait().ok();
                Err(GhcError::Timeout {
                    command: command.to_string(),
                    seconds,
                })
            }
        }
    }
}

fn split_command(command: &str) -> Result<(&str, Vec<&str>)> {
    let mut parts = command.split_whitespace();
    let program = parts
        .next()
        .ok_or_else(|| GhcError::invalid_input("empty command"))?;
    Ok((program, parts.collect()))
}

fn check_status(command: &str, status: ExitStatus) -> Result<()> {
    if status.success() {
        Ok(())
    } else {
        Err(GhcError::command(format!(
            "'{}' exited with {}",
            command, status
        )))
    }
}
