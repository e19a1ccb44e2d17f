//! External process execution with a fixed timeout

use crate::config::TIMING_CONFIG;
use crate::error::{HarnessError, Result};
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tokio::runtime::{Builder, Runtime};
use tracing::debug;

/// Runs one external command line to completion
///
/// Implementations return captured stdout on a zero exit status (an empty
/// string when output is not captured) and report every failure as
/// [`HarnessError::DeviceCommand`].
pub trait CommandRunner {
    fn run(&self, command: &[String], capture_output: bool) -> Result<String>;
}

impl<R: CommandRunner + ?Sized> CommandRunner for &R {
    fn run(&self, command: &[String], capture_output: bool) -> Result<String> {
        (**self).run(command, capture_output)
    }
}

/// Runs commands as real child processes
///
/// Calls block the current thread and must not be made from inside another
/// async runtime. A dedicated current-thread runtime drives the child and its
/// timeout; a child that outlives the timeout is killed.
pub struct SystemRunner {
    runtime: Runtime,
    timeout: Duration,
}

impl SystemRunner {
    /// Create a runner using the configured command timeout
    pub fn new() -> Result<Self> {
        Self::with_timeout(TIMING_CONFIG.command.timeout())
    }

    /// Create a runner with a custom timeout
    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let runtime = Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(HarnessError::Io)?;
        Ok(Self { runtime, timeout })
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl CommandRunner for SystemRunner {
    fn run(&self, command: &[String], capture_output: bool) -> Result<String> {
        let (program, args) = command
            .split_first()
            .ok_or_else(|| HarnessError::DeviceCommand("Empty command".to_string()))?;
        let line = command.join(" ");

        debug!("Executing command: {:?}", command);

        let mut cmd = Command::new(program);
        cmd.args(args).stdin(Stdio::null()).kill_on_drop(true);
        if capture_output {
            cmd.stdout(Stdio::piped()).stderr(Stdio::piped());
        } else {
            cmd.stdout(Stdio::inherit()).stderr(Stdio::inherit());
        }

        let timeout = self.timeout;
        let output = self
            .runtime
            .block_on(async { tokio::time::timeout(timeout, cmd.output()).await })
            .map_err(|_| {
                HarnessError::DeviceCommand(format!(
                    "Command timed out after {:?}: {}",
                    timeout, line
                ))
            })?
            .map_err(|e| HarnessError::DeviceCommand(format!("Could not run '{}': {}", line, e)))?;

        if !output.status.success() {
            let status = output
                .status
                .code()
                .map(|code| code.to_string())
                .unwrap_or_else(|| "unknown (terminated by signal)".to_string());
            let stderr = String::from_utf8_lossy(&output.stderr);
            let mut cause = format!(
                "Command '{}' returned non-zero exit status {}",
                line, status
            );
            if !stderr.trim().is_empty() {
                cause.push_str(": ");
                cause.push_str(stderr.trim());
            }
            return Err(HarnessError::DeviceCommand(cause));
        }

        debug!("Finished successfully");
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    fn sh(script: &str) -> Vec<String> {
        vec!["sh".to_string(), "-c".to_string(), script.to_string()]
    }

    fn runner() -> SystemRunner {
        SystemRunner::with_timeout(Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn test_captures_stdout() {
        let out = runner().run(&sh("printf 'hello'"), true).unwrap();
        assert_eq!(out, "hello");
    }

    #[test]
    fn test_uncaptured_output_returns_empty() {
        let out = runner().run(&sh("true"), false).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn test_non_zero_exit_is_device_command_error() {
        let err = runner()
            .run(&sh("echo boom >&2; exit 3"), true)
            .unwrap_err();
        match err {
            HarnessError::DeviceCommand(cause) => {
                assert!(cause.contains("exit status 3"), "{cause}");
                assert!(cause.contains("boom"), "{cause}");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_timeout_is_device_command_error() {
        let runner = SystemRunner::with_timeout(Duration::from_millis(100)).unwrap();
        let err = runner.run(&sh("sleep 5"), true).unwrap_err();
        match err {
            HarnessError::DeviceCommand(cause) => assert!(cause.contains("timed out"), "{cause}"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_empty_command_is_rejected() {
        let err = runner().run(&[], true).unwrap_err();
        assert!(matches!(err, HarnessError::DeviceCommand(_)));
    }

    #[test]
    fn test_missing_program_is_device_command_error() {
        let command = vec!["buggycalc-definitely-not-a-program".to_string()];
        let err = runner().run(&command, true).unwrap_err();
        assert!(matches!(err, HarnessError::DeviceCommand(_)));
    }
}
