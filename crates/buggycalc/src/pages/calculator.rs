//! Page object for the calculator's single screen

use super::screenshot::{ScreenshotReport, DEFAULT_SCREENSHOT_DIR};
use crate::adb::{AdbController, CommandRunner, InputValue, SystemRunner};
use crate::config::{secs_duration, Field, PageTimingConfig, TIMING_CONFIG};
use crate::error::{HarnessError, Result};
use crate::parser::{Bounds, UiParser};
use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::thread;
use tracing::{debug, info};

lazy_static! {
    /// Hint text shown by an empty input field
    static ref PLACEHOLDER: Regex = Regex::new(r"^Enter the (first|second) number").unwrap();
}

/// Bounds and text of one field, read from a single dump
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldSnapshot {
    pub field: Field,
    pub bounds: Option<Bounds>,
    pub text: Option<String>,
}

/// UI operations on the calculator app
///
/// Each operation fetches a fresh hierarchy dump where it needs one and
/// blocks until its device commands finish.
pub struct CalculatorPage<R> {
    package_name: String,
    activity_name: String,
    adb: AdbController<R>,
    parser: UiParser,
    timing: PageTimingConfig,
    screenshot_dir: PathBuf,
}

impl CalculatorPage<SystemRunner> {
    /// Page object driving the real `adb` binary
    pub fn connect(package_name: &str, activity_name: &str) -> Result<Self> {
        Ok(Self::new(package_name, activity_name, SystemRunner::new()?))
    }
}

impl<R: CommandRunner> CalculatorPage<R> {
    pub fn new(package_name: &str, activity_name: &str, runner: R) -> Self {
        Self {
            package_name: package_name.to_string(),
            activity_name: activity_name.to_string(),
            adb: AdbController::new(runner),
            parser: UiParser::new(package_name),
            timing: TIMING_CONFIG.page.clone(),
            screenshot_dir: PathBuf::from(DEFAULT_SCREENSHOT_DIR),
        }
    }

    pub fn with_timing(mut self, timing: PageTimingConfig) -> Self {
        self.timing = timing;
        self
    }

    pub fn with_screenshot_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.screenshot_dir = dir.into();
        self
    }

    pub fn package_name(&self) -> &str {
        &self.package_name
    }

    pub fn activity_name(&self) -> &str {
        &self.activity_name
    }

    pub fn adb(&self) -> &AdbController<R> {
        &self.adb
    }

    pub fn screenshot_dir(&self) -> &Path {
        &self.screenshot_dir
    }

    /// Start the app and wait for it to finish loading
    pub fn launch(&self) -> Result<()> {
        debug!("Launching app: {}", self.package_name);
        self.adb.launch_app(&self.package_name, &self.activity_name)?;
        settle(self.timing.launch_delay);
        Ok(())
    }

    pub fn close(&self) -> Result<()> {
        debug!("Closing app: {}", self.package_name);
        self.adb.close_app(&self.package_name)
    }

    /// Tap the center of `field`
    pub fn tap(&self, field: Field) -> Result<()> {
        debug!("Tapping button: {}", field);
        let dump = self.adb.ui_dump()?;
        let bounds = self.parser.element_bounds(&dump, field)?;
        debug!("Button bounds: {:?}", bounds);

        let bounds = bounds.ok_or_else(|| {
            HarnessError::ElementNotFound(format!("Button '{}' not found in UI", field))
        })?;
        let (x, y) = bounds.center();

        debug!("Tapping in: x={}, y={}", x, y);
        self.adb.tap(x, y)?;
        settle(self.timing.tap_delay);
        Ok(())
    }

    /// Text currently displayed by `field`
    pub fn read(&self, field: Field) -> Result<String> {
        debug!("Getting display value for '{}'", field);
        let dump = self.adb.ui_dump()?;
        self.parser.element_text(&dump, field)
    }

    /// Text of the result view
    pub fn read_result(&self) -> Result<String> {
        self.read(Field::Result)
    }

    /// Number of characters in `field`; a placeholder prompt counts as empty
    pub fn field_length(&self, field: Field) -> Result<usize> {
        let value = self.read(field)?;
        Ok(input_length(&value))
    }

    /// Focus `field` and delete its characters one at a time
    pub fn clear_field(&self, field: Field) -> Result<()> {
        debug!("Clearing input from '{}' field", field);
        let length = self.field_length(field)?;
        if length == 0 {
            return Ok(());
        }

        self.tap(field)?;
        for _ in 0..length {
            self.adb.delete_char()?;
        }
        Ok(())
    }

    pub fn clear_all_inputs(&self) -> Result<()> {
        debug!("Clearing input fields");
        for field in Field::INPUTS {
            self.clear_field(field)?;
        }
        Ok(())
    }

    /// Focus `field` and type `value` after whatever it already holds
    pub fn set_field(&self, field: Field, value: impl Into<InputValue>) -> Result<()> {
        let value = value.into();
        debug!("Input value '{}' to '{}' field", value, field);
        self.tap(field)?;
        self.adb.input_text(value)
    }

    /// Clear both inputs, enter the given operands, tap `operation` and read the result
    ///
    /// Missing or empty operands leave their field empty.
    pub fn perform_calculation(
        &self,
        operation: Field,
        first: Option<&str>,
        second: Option<&str>,
    ) -> Result<String> {
        self.clear_all_inputs()?;

        for (field, value) in Field::INPUTS.into_iter().zip([first, second]) {
            if let Some(value) = value.filter(|v| !v.is_empty()) {
                self.set_field(field, value)?;
            }
        }
        self.tap(operation)?;

        self.read_result()
    }

    /// Bounds and text of every field from one dump
    pub fn snapshot(&self) -> Result<Vec<FieldSnapshot>> {
        let dump = self.adb.ui_dump()?;
        Field::ALL
            .into_iter()
            .map(|field| {
                let bounds = self.parser.element_bounds(&dump, field)?;
                let text = match self.parser.element_text(&dump, field) {
                    Ok(text) => Some(text),
                    Err(HarnessError::ResultNotFound(_)) => None,
                    Err(e) => return Err(e),
                };
                Ok(FieldSnapshot {
                    field,
                    bounds,
                    text,
                })
            })
            .collect()
    }

    /// Capture the screen, pull it into the screenshot directory and remove the device copy
    ///
    /// When the pull fails the device-side file is left in place.
    pub fn capture_and_retrieve_screenshot(&self, name: &str) -> Result<ScreenshotReport> {
        fs::create_dir_all(&self.screenshot_dir)?;

        debug!("Taking screenshot...");
        self.adb.take_screenshot(name)?;

        debug!("Pulling {}.png from device...", name);
        let local_path = self.adb.pull_screenshot(name, &self.screenshot_dir)?;

        debug!("Removing {}.png from device...", name);
        self.adb.delete_screenshot_from_device(name)?;

        info!(
            "Screenshot '{}.png' saved to: {}",
            name,
            self.screenshot_dir.display()
        );
        Ok(ScreenshotReport::from_path(local_path))
    }
}

/// Character count of an input's text, zero for the placeholder prompt
fn input_length(value: &str) -> usize {
    if PLACEHOLDER.is_match(value) {
        0
    } else {
        value.chars().count()
    }
}

fn settle(secs: f64) {
    let delay = secs_duration(secs);
    if !delay.is_zero() {
        thread::sleep(delay);
    }
}
