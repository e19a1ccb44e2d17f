//! Device control operations for the attached Android device

use super::runner::CommandRunner;
use crate::error::Result;

/// Build an `adb` command line from its arguments
pub fn adb_command(args: &[&str]) -> Vec<String> {
    let mut command = Vec::with_capacity(args.len() + 1);
    command.push("adb".to_string());
    command.extend(args.iter().map(|arg| arg.to_string()));
    command
}

/// Issues device actions through a [`CommandRunner`]
///
/// Every operation is a single blocking command; nothing is retried.
pub struct AdbController<R> {
    runner: R,
}

impl<R: CommandRunner> AdbController<R> {
    pub fn new(runner: R) -> Self {
        Self { runner }
    }

    /// The underlying command runner
    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Run a command and return its captured stdout
    pub fn execute(&self, command: &[String], capture_output: bool) -> Result<String> {
        self.runner.run(command, capture_output)
    }

    /// Run a command with output passed through to the terminal
    pub(super) fn execute_quiet(&self, args: &[&str]) -> Result<()> {
        self.execute(&adb_command(args), false).map(|_| ())
    }

    /// Start `package/activity`
    pub fn launch_app(&self, package: &str, activity: &str) -> Result<()> {
        let component = format!("{}/{}", package, activity);
        self.execute_quiet(&["shell", "am", "start", "-n", &component])
    }

    /// Force-stop `package`
    pub fn close_app(&self, package: &str) -> Result<()> {
        self.execute_quiet(&["shell", "am", "force-stop", package])
    }

    /// Tap at the specified coordinates
    pub fn tap(&self, x: u32, y: u32) -> Result<()> {
        let (x, y) = (x.to_string(), y.to_string());
        self.execute_quiet(&["shell", "input", "tap", &x, &y])
    }

    /// Fetch the current UI hierarchy as raw text
    pub fn ui_dump(&self) -> Result<String> {
        self.execute(
            &adb_command(&["exec-out", "uiautomator", "dump", "/dev/tty"]),
            true,
        )
    }
}
