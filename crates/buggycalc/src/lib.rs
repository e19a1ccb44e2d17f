//! buggycalc: UI test harness for the buggycalc Android calculator
//!
//! This library drives a single attached Android device through `adb`:
//! - ADB gateway that runs fixed command lines with a timeout
//! - Parser that finds element bounds and text in uiautomator dumps
//! - Calculator page object composing the two into UI actions
//!
//! # Example
//!
//! ```no_run
//! use buggycalc::{CalculatorPage, Field, DEFAULT_ACTIVITY, DEFAULT_PACKAGE};
//!
//! fn main() -> buggycalc::Result<()> {
//!     let calculator = CalculatorPage::connect(DEFAULT_PACKAGE, DEFAULT_ACTIVITY)?;
//!     calculator.launch()?;
//!
//!     let result = calculator.perform_calculation(Field::Add, Some("1"), Some("2"))?;
//!     println!("Result: {}", result);
//!
//!     calculator.close()
//! }
//! ```

// Core modules
pub mod error;

// Configuration module
pub mod config;

// Device gateway
pub mod adb;

// Core functionality
pub mod pages;
pub mod parser;

#[cfg(test)]
pub(crate) mod testing;

// Re-export commonly used types and functions
pub use error::{HarnessError, Result};

// Config re-exports
pub use config::{
    list_valid_fields, CommandTimingConfig, Field, PageTimingConfig, TimingConfig,
    DEFAULT_ACTIVITY, DEFAULT_PACKAGE, TIMING_CONFIG,
};

// ADB re-exports
pub use adb::{adb_command, AdbController, CommandRunner, InputValue, SystemRunner};

// Parser re-exports
pub use parser::{Bounds, UiParser};

// Page re-exports
pub use pages::{
    scenario_screenshot_name, timestamped_screenshot_name, CalculatorPage, FieldSnapshot,
    ScreenshotReport, DEFAULT_SCREENSHOT_DIR,
};
