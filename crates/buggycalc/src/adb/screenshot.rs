//! Screenshot capture and transfer

use super::device::AdbController;
use super::runner::CommandRunner;
use crate::error::Result;
use std::path::{Path, PathBuf};

/// Where `name` is written on the device
pub fn device_screenshot_path(name: &str) -> String {
    format!("/sdcard/{}.png", name)
}

/// Where `name` lands inside `local_dir`
pub fn local_screenshot_path(name: &str, local_dir: &Path) -> PathBuf {
    PathBuf::from(format!("{}/{}.png", local_dir.display(), name))
}

impl<R: CommandRunner> AdbController<R> {
    /// Capture the screen to the device-side file for `name`
    pub fn take_screenshot(&self, name: &str) -> Result<()> {
        let device_path = device_screenshot_path(name);
        self.execute_quiet(&["shell", "screencap", "-p", &device_path])
    }

    /// Copy the device-side file for `name` into `local_dir`
    ///
    /// `local_dir` must already exist.
    pub fn pull_screenshot(&self, name: &str, local_dir: &Path) -> Result<PathBuf> {
        let device_path = device_screenshot_path(name);
        let local_path = local_screenshot_path(name, local_dir);
        let local = local_path.to_string_lossy();
        self.execute_quiet(&["pull", &device_path, &local])?;
        Ok(local_path)
    }

    /// Remove the device-side file for `name`
    pub fn delete_screenshot_from_device(&self, name: &str) -> Result<()> {
        let device_path = device_screenshot_path(name);
        self.execute_quiet(&["shell", "rm", &device_path])
    }
}
