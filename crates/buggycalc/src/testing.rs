//! Recording command runner shared by unit tests

use crate::adb::CommandRunner;
use crate::error::{HarnessError, Result};
use std::cell::RefCell;

/// UI hierarchy dump of the calculator's main screen
pub(crate) const UI_DUMP: &str = include_str!("../tests/resources/ui_dump.xml");

/// Records every command and answers capturing commands with a fixed dump
#[derive(Default)]
pub(crate) struct FakeRunner {
    calls: RefCell<Vec<(Vec<String>, bool)>>,
    dump: RefCell<String>,
    fail_on: RefCell<Option<String>>,
}

impl FakeRunner {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_dump(dump: &str) -> Self {
        let runner = Self::default();
        runner.set_dump(dump);
        runner
    }

    pub(crate) fn set_dump(&self, dump: &str) {
        *self.dump.borrow_mut() = dump.to_string();
    }

    /// Fail every command whose joined line contains `needle`
    pub(crate) fn fail_when(&self, needle: &str) {
        *self.fail_on.borrow_mut() = Some(needle.to_string());
    }

    pub(crate) fn calls(&self) -> Vec<(Vec<String>, bool)> {
        self.calls.borrow().clone()
    }

    /// Recorded command lines joined with spaces
    pub(crate) fn lines(&self) -> Vec<String> {
        self.calls
            .borrow()
            .iter()
            .map(|(command, _)| command.join(" "))
            .collect()
    }

    pub(crate) fn count(&self, line: &str) -> usize {
        self.lines().iter().filter(|l| l.as_str() == line).count()
    }
}

impl CommandRunner for FakeRunner {
    fn run(&self, command: &[String], capture_output: bool) -> Result<String> {
        self.calls
            .borrow_mut()
            .push((command.to_vec(), capture_output));

        let line = command.join(" ");
        if let Some(needle) = self.fail_on.borrow().as_deref() {
            if line.contains(needle) {
                return Err(HarnessError::DeviceCommand(format!(
                    "Command '{}' returned non-zero exit status 1",
                    line
                )));
            }
        }

        if capture_output {
            Ok(self.dump.borrow().clone())
        } else {
            Ok(String::new())
        }
    }
}
