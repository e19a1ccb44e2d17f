//! ADB (Android Debug Bridge) gateway for the attached device
//!
//! This module provides:
//! - `runner`: External process execution with a fixed timeout
//! - `device`: App lifecycle, taps and UI hierarchy dumps
//! - `input`: Text input and character deletion
//! - `screenshot`: Screenshot capture, transfer and cleanup

mod device;
mod input;
mod runner;
mod screenshot;

pub use device::{adb_command, AdbController};
pub use input::InputValue;
pub use runner::{CommandRunner, SystemRunner};
pub use screenshot::{device_screenshot_path, local_screenshot_path};
